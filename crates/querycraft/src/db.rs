mod builder;
pub use builder::Builder;

mod connect;

use crate::{engine::Engine, Entity, ExecutionContext, Query};

use querycraft_core::{
    driver::{
        operation::{ExecSql, QuerySql},
        Dialect, Operation, Response,
    },
    schema::EntityMetadata,
    stmt::{Record, Value},
    Result,
};

use std::sync::Arc;

/// A database handle. Clones share the connection, the cache and the
/// execution context.
#[derive(Debug, Clone)]
pub struct Db {
    engine: Arc<Engine>,
}

/// Leading keywords of statements that return rows.
const ROW_KEYWORDS: &[&str] = &["select", "with", "pragma", "values", "show", "explain"];

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects with a default [`ExecutionContext`].
    pub async fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url).await
    }

    /// Starts a query session over rows of `meta`'s table, returned as
    /// [`Record`]s.
    pub fn table(&self, meta: impl Into<Arc<EntityMetadata>>) -> Query<'_, Record> {
        Query::new(self, meta.into())
    }

    /// Starts a query session over an entity type.
    pub fn model<E: Entity>(&self) -> Query<'_, E> {
        Query::new(self, Arc::new(E::metadata()))
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.engine.cx
    }

    pub fn dialect(&self) -> Dialect {
        self.engine.dialect()
    }

    /// Runs caller-written SQL with positional `params`.
    ///
    /// The cache is bypassed. Statements that do not read rows clear it.
    pub async fn exec_raw(&self, sql: &str, params: Vec<Value>) -> Result<Response> {
        let op: Operation = if returns_rows(sql) {
            QuerySql {
                sql: sql.to_string(),
                params,
            }
            .into()
        } else {
            ExecSql {
                sql: sql.to_string(),
                params,
                last_insert_id: false,
            }
            .into()
        };

        self.engine.exec_raw(op).await
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }
}

fn returns_rows(sql: &str) -> bool {
    let Some(keyword) = sql.split_whitespace().next() else {
        return false;
    };

    ROW_KEYWORDS
        .iter()
        .any(|candidate| keyword.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use super::returns_rows;

    #[test]
    fn row_returning_statements() {
        assert!(returns_rows("SELECT 1"));
        assert!(returns_rows("  with t as (select 1) select * from t"));
        assert!(returns_rows("PRAGMA table_info(users)"));
        assert!(!returns_rows("INSERT INTO users (name) VALUES ('a')"));
        assert!(!returns_rows("CREATE TABLE t (id INTEGER)"));
        assert!(!returns_rows(""));
    }
}
