use super::{Filter, TableName, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableName,
    pub assignments: Vec<Assignment>,
    pub filter: Filter,
}

/// `column = ?`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}
