use super::TableName;

/// Remove every row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncate {
    pub table: TableName,
}
