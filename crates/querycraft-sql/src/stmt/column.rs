/// An entry of a SELECT projection.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Column name, `*`, or a function expression passed through as written
    Name(String),

    /// `COUNT(column) AS alias`
    Count { column: String, alias: String },
}

impl Column {
    pub fn name(name: impl Into<String>) -> Column {
        Column::Name(name.into())
    }

    pub fn count(column: impl Into<String>, alias: impl Into<String>) -> Column {
        Column::Count {
            column: column.into(),
            alias: alias.into(),
        }
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Column::name(value)
    }
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Column::Name(value)
    }
}
