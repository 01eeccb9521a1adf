use super::{Filter, TableName};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableName,
    pub filter: Filter,
}
