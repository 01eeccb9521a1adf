use super::Operation;
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ExecSql {
    pub sql: String,

    /// Positional parameters, one per placeholder
    pub params: Vec<Value>,

    /// Report the generated key of the last inserted row
    pub last_insert_id: bool,
}

impl From<ExecSql> for Operation {
    fn from(value: ExecSql) -> Self {
        Self::ExecSql(value)
    }
}
