use super::{Column, Filter, Limit, OrderBy, TableName};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: TableName,
    pub columns: Vec<Column>,
    pub filter: Filter,
    pub group_by: Vec<String>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

impl Select {
    /// `SELECT * FROM table`
    pub fn new(table: TableName) -> Select {
        Select {
            table,
            columns: vec![Column::name("*")],
            filter: Filter::default(),
            group_by: vec![],
            order_by: vec![],
            limit: None,
        }
    }
}
