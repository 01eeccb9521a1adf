use crate::{engine::Engine, Db, FromRecord};

use querycraft_core::{
    schema::EntityMetadata,
    stmt::{Boolean, Direction, Op, QueryState, Record, Value},
    Error, Result,
};
use querycraft_sql::Compiled;

use std::{marker::PhantomData, sync::Arc};

/// A query session over one table.
///
/// Builder calls accumulate state; every terminal call (`get`, `insert`,
/// `delete`, ...) consumes it and leaves the session empty again. Named
/// snapshots survive terminal calls.
#[derive(Debug)]
pub struct Query<'db, E = Record> {
    db: &'db Db,
    meta: Arc<EntityMetadata>,
    state: QueryState,
    _p: PhantomData<fn() -> E>,
}

impl<'db, E: FromRecord> Query<'db, E> {
    pub(crate) fn new(db: &'db Db, meta: Arc<EntityMetadata>) -> Self {
        Query {
            db,
            meta,
            state: QueryState::new(),
            _p: PhantomData,
        }
    }

    pub fn metadata(&self) -> &EntityMetadata {
        &self.meta
    }

    pub fn select<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.select(columns);
        self
    }

    /// `column op value`. The value is ignored for `IS NULL` / `IS NOT NULL`.
    pub fn filter(
        &mut self,
        column: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.state.push_where(column, op, value, Boolean::And);
        self
    }

    pub fn filter_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.filter(column, Op::Eq, value)
    }

    pub fn or_filter(
        &mut self,
        column: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.state.push_where(column, op, value, Boolean::Or);
        self
    }

    pub fn or_filter_eq(
        &mut self,
        column: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.or_filter(column, Op::Eq, value)
    }

    pub fn filter_is_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.push_where(column, Op::IsNull, Value::Null, Boolean::And);
        self
    }

    pub fn filter_is_not_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.push_where(column, Op::IsNotNull, Value::Null, Boolean::And);
        self
    }

    pub fn or_filter_is_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.push_where(column, Op::IsNull, Value::Null, Boolean::Or);
        self
    }

    pub fn or_filter_is_not_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.push_where(column, Op::IsNotNull, Value::Null, Boolean::Or);
        self
    }

    pub fn order_by(&mut self, column: impl Into<String>, direction: Direction) -> &mut Self {
        self.state.order_by(column, direction);
        self
    }

    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.group_by(columns);
        self
    }

    pub fn limit(&mut self, limit: u64, offset: Option<u64>) -> &mut Self {
        self.state.limit(limit, offset);
        self
    }

    /// Includes soft-deleted rows.
    pub fn with_deleted(&mut self) -> &mut Self {
        self.state.with_deleted();
        self
    }

    pub fn take_snapshot(&mut self, name: Option<&str>) -> &mut Self {
        self.state.take_snapshot(name);
        self
    }

    pub fn restore_snapshot(&mut self, name: Option<&str>) -> Result<&mut Self> {
        self.state.restore_snapshot(name)?;
        Ok(self)
    }

    /// Compiles the current SELECT without running it or resetting state.
    pub fn to_sql(&self) -> Result<Compiled> {
        let engine = self.engine();
        let stmt = engine.lower_select(&self.state, &self.meta)?;
        Ok(engine.compile(&stmt))
    }

    pub async fn get(&mut self) -> Result<Vec<E>> {
        let state = self.state.take();
        self.fetch(&state).await
    }

    pub async fn first(&mut self) -> Result<Option<E>> {
        let mut state = self.state.take();
        state.limit = Some(1);

        Ok(self.fetch(&state).await?.into_iter().next())
    }

    /// Every row, ignoring accumulated filters.
    pub async fn all(&mut self) -> Result<Vec<E>> {
        self.state.reset();
        self.get().await
    }

    pub async fn count(&mut self, column: &str) -> Result<u64> {
        let state = self.state.take();
        let engine = self.engine();

        let stmt = engine.lower_count(&state, &self.meta, column)?;
        let rows = engine.select(&stmt, &self.meta).await?;

        let Some(value) = rows.first().and_then(|row| row.get(crate::engine::AGGREGATE)) else {
            return Ok(0);
        };

        value
            .as_i64()
            .and_then(|count| u64::try_from(count).ok())
            .ok_or_else(|| Error::type_conversion(value.clone(), "u64"))
    }

    /// Inserts every row in one statement; all rows must share the first
    /// row's keys.
    pub async fn insert(&mut self, rows: Vec<Record>) -> Result<u64> {
        self.state.take();

        if rows.is_empty() {
            return Ok(0);
        }

        let engine = self.engine();
        let stmt = engine.lower_insert(rows, &self.meta)?;

        engine.mutate(&stmt, false).await?.rows.into_count()
    }

    /// Inserts one record and returns the values written, with the generated
    /// primary key when the driver reports one.
    pub async fn create(&mut self, values: Record) -> Result<Record> {
        self.state.take();

        let engine = self.engine();
        let (stmt, mut record) = engine.lower_create(values, &self.meta)?;
        let response = engine.mutate(&stmt, true).await?;

        if let Some(id) = response.last_insert_id {
            record.insert(self.meta.primary_key.clone(), id);
        }

        Ok(record)
    }

    pub async fn update(&mut self, values: Record) -> Result<u64> {
        let state = self.state.take();
        let engine = self.engine();

        let stmt = engine.lower_update(&state, values, &self.meta)?;
        engine.mutate(&stmt, false).await?.rows.into_count()
    }

    /// Deletes the filtered rows, or stamps them when the entity soft
    /// deletes.
    pub async fn delete(&mut self) -> Result<u64> {
        let state = self.state.take();
        let engine = self.engine();

        let stmt = engine.lower_delete(&state, &self.meta)?;
        engine.mutate(&stmt, false).await?.rows.into_count()
    }

    pub async fn truncate(&mut self) -> Result<u64> {
        self.state.take();
        let engine = self.engine();

        let stmt = engine.lower_truncate(&self.meta)?;
        engine.mutate(&stmt, false).await?.rows.into_count()
    }

    async fn fetch(&self, state: &QueryState) -> Result<Vec<E>> {
        let engine = self.engine();

        let stmt = engine.lower_select(state, &self.meta)?;
        let rows = engine.select(&stmt, &self.meta).await?;

        engine.hydrate(&rows, &self.meta)
    }

    fn engine(&self) -> &'db Engine {
        self.db.engine()
    }
}
