#[macro_use]
mod fmt;
use fmt::ToSql;

mod compiled;
pub use compiled::Compiled;

mod delim;
use delim::{Comma, Delimited, Period};

mod flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod filter;
mod statement;

use crate::stmt::{Statement, TableName};

use querycraft_core::{driver::Dialect, stmt::Value};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// Handles the differences between SQL dialects: quoting, placeholders,
    /// and pagination.
    dialect: Dialect,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret
    }

    /// Renders a table reference exactly as it appears in compiled statements.
    pub fn table_name(&self, table: &TableName) -> String {
        let mut ret = String::new();
        let mut params: Vec<Value> = Vec::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params: &mut params,
        };

        table.to_sql(&mut fmt);

        ret
    }

    /// Serializes `stmt`, collecting its parameters in placeholder order.
    pub fn compile(&self, stmt: &Statement) -> Compiled {
        let mut params = Vec::new();
        let sql = self.serialize(stmt, &mut params);
        Compiled { sql, params }
    }
}
