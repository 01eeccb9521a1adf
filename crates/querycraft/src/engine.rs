mod exec;
mod hydrate;
mod lower;
pub(crate) use lower::AGGREGATE;

use crate::ExecutionContext;

use querycraft_core::driver::{Connection, Dialect};
use querycraft_sql::{stmt::TableName, Compiled, Serializer, Statement};

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Turns builder state into SQL, runs it, and shapes the results.
#[derive(Debug)]
pub(crate) struct Engine {
    pub(crate) cx: Arc<ExecutionContext>,

    serializer: Serializer,

    /// One statement runs at a time
    connection: Mutex<Box<dyn Connection>>,
}

impl Engine {
    pub(crate) fn new(cx: Arc<ExecutionContext>, connection: Box<dyn Connection>) -> Engine {
        Engine {
            cx,
            serializer: Serializer::new(connection.dialect()),
            connection: Mutex::new(connection),
        }
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.serializer.dialect()
    }

    pub(crate) fn compile(&self, stmt: &Statement) -> Compiled {
        let compiled = self.serializer.compile(stmt);

        debug!(
            dialect = %self.dialect(),
            table = %stmt.table().name,
            params = compiled.params.len(),
            sql = %compiled.sql,
            "compiled statement"
        );

        compiled
    }

    /// The table as it appears in compiled SQL, used to scope cache
    /// invalidation.
    pub(crate) fn quoted_table(&self, table: &TableName) -> String {
        self.serializer.table_name(table)
    }
}
