use super::Operation;
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySql {
    pub sql: String,

    /// Positional parameters, one per placeholder
    pub params: Vec<Value>,
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
