use super::{TableName, Value};

/// Multi-row INSERT. Every row holds one value per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableName,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}
