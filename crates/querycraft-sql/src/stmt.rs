mod column;
pub use column::Column;

mod delete;
pub use delete::Delete;

mod filter;
pub use filter::{Condition, Filter};

mod insert;
pub use insert::Insert;

mod limit;
pub use limit::Limit;

mod select;
pub use select::Select;

mod table_name;
pub use table_name::TableName;

mod truncate;
pub use truncate::Truncate;

mod update;
pub use update::{Assignment, Update};

pub use querycraft_core::stmt::{Boolean, Direction, Op, OrderBy, Value};

/// A fully lowered statement, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Truncate(Truncate),
}

impl Statement {
    pub fn table(&self) -> &TableName {
        match self {
            Statement::Select(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
            Statement::Truncate(stmt) => &stmt.table,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}

macro_rules! impl_from_stmt {
    ( $( $name:ident ),* ) => {
        $(
            impl From<$name> for Statement {
                fn from(value: $name) -> Self {
                    Statement::$name(value)
                }
            }
        )*
    };
}

impl_from_stmt!(Select, Insert, Update, Delete, Truncate);
