use super::Engine;
use crate::{CacheKey, QueryLogEntry};

use querycraft_core::{
    driver::operation::{ExecSql, Operation, QuerySql},
    driver::{Connection, Response},
    schema::EntityMetadata,
    stmt::Record,
    Error, Result,
};
use querycraft_sql::{Compiled, Statement};

use std::{sync::Arc, time::Instant};
use tracing::trace;

// Cache writes and invalidations happen while the connection is still held,
// so a store can never land after a later mutation's invalidation.
impl Engine {
    /// Runs a SELECT, serving it from the cache when eligible.
    pub(crate) async fn select(
        &self,
        stmt: &Statement,
        meta: &EntityMetadata,
    ) -> Result<Arc<Vec<Record>>> {
        let compiled = self.compile(stmt);
        let table = &stmt.table().name;

        let key = self.cache_key(&compiled, meta);

        if let Some(key) = &key {
            if let Some(rows) = self.cx.cache().get(key) {
                trace!(table = %table, rows = rows.len(), "cache hit");
                self.log_query(&compiled.sql, table, Instant::now(), true);
                return Ok(rows);
            }
        }

        let start = Instant::now();
        let Compiled { sql, params } = compiled;

        let mut connection = self.connection.lock().await;

        let response = run(
            &mut **connection,
            QuerySql {
                sql: sql.clone(),
                params,
            },
        )
        .await?;

        let rows = Arc::new(response.rows.into_values()?);
        self.log_query(&sql, table, start, false);

        if let Some(key) = key {
            trace!(table = %table, rows = rows.len(), "cache store");
            self.cx.cache().set(key, rows.clone());
        }

        drop(connection);

        Ok(rows)
    }

    /// Runs an INSERT, UPDATE, DELETE or TRUNCATE, then drops cached reads of
    /// the same table.
    pub(crate) async fn mutate(
        &self,
        stmt: &Statement,
        last_insert_id: bool,
    ) -> Result<Response> {
        let Compiled { sql, params } = self.compile(stmt);
        let table = stmt.table();

        let start = Instant::now();
        let mut connection = self.connection.lock().await;

        let response = run(
            &mut **connection,
            ExecSql {
                sql: sql.clone(),
                params,
                last_insert_id,
            },
        )
        .await?;

        self.log_query(&sql, &table.name, start, false);

        let removed = self.cx.cache().invalidate_table(&self.quoted_table(table));

        if !removed.is_empty() {
            trace!(table = %table.name, removed = removed.len(), "cache invalidated");
        }

        drop(connection);

        Ok(response)
    }

    /// Runs caller-written SQL. Never cached; anything other than a read
    /// clears the whole cache since the affected tables are unknown.
    pub(crate) async fn exec_raw(&self, op: Operation) -> Result<Response> {
        let sql = op.sql().to_string();
        let is_query = op.is_query();
        let start = Instant::now();
        let mut connection = self.connection.lock().await;

        let response = run(&mut **connection, op).await?;
        self.log_query(&sql, "", start, false);

        if !is_query {
            trace!("cache cleared by raw statement");
            self.cx.cache().clear();
        }

        drop(connection);

        Ok(response)
    }

    fn cache_key(&self, compiled: &Compiled, meta: &EntityMetadata) -> Option<CacheKey> {
        let eligible = self.cx.cache_enabled()
            && meta.cache_enabled
            && compiled.sql.len() < self.cx.cache_max_sql_len();

        eligible.then(|| CacheKey::from(compiled))
    }

    fn log_query(&self, sql: &str, table: &str, start: Instant, cached: bool) {
        if !self.cx.debug() {
            return;
        }

        self.cx.record_query(QueryLogEntry {
            sql: sql.to_string(),
            elapsed: start.elapsed(),
            cached,
            table: table.to_string(),
        });
    }
}

/// Every failure surfaces as an execution error carrying the SQL text.
async fn run(connection: &mut dyn Connection, op: impl Into<Operation>) -> Result<Response> {
    let op = op.into();
    let sql = op.sql().to_string();

    connection.exec(op).await.map_err(|err| {
        if err.is_execution() {
            err
        } else {
            Error::execution(sql, err.to_string())
        }
    })
}
