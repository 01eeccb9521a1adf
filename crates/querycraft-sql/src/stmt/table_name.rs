/// Possibly schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> TableName {
        TableName {
            schema: None,
            name: name.into(),
        }
    }

    pub fn with_schema(mut self, schema: Option<impl Into<String>>) -> TableName {
        self.schema = schema.map(Into::into);
        self
    }
}
