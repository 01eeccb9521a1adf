use super::Engine;

use querycraft_core::{
    schema::{Cast, EntityMetadata},
    stmt::{QueryState, Record, Value},
    Error, GuardKind, Result,
};
use querycraft_sql::{
    stmt::{
        Assignment, Column, Condition, Delete, Filter, Insert, Limit, Select, TableName,
        Truncate, Update,
    },
    Statement,
};

use chrono::Utc;
use tracing::warn;

/// Alias of the `COUNT(..)` column
pub(crate) const AGGREGATE: &str = "aggregate";

impl Engine {
    pub(crate) fn lower_select(
        &self,
        state: &QueryState,
        meta: &EntityMetadata,
    ) -> Result<Statement> {
        let mut select = Select::new(self.lower_table(meta)?);

        select.columns = state.columns.iter().cloned().map(Column::Name).collect();
        select.filter = lower_filter(state, meta);
        select.group_by = state.group_by.clone();
        select.order_by = state.order_by.clone();
        select.limit = state.limit.map(|limit| Limit {
            limit,
            offset: state.offset,
        });

        Ok(select.into())
    }

    /// `SELECT COUNT(column) AS aggregate` over the filtered rows. Ordering,
    /// grouping and pagination do not apply.
    pub(crate) fn lower_count(
        &self,
        state: &QueryState,
        meta: &EntityMetadata,
        column: &str,
    ) -> Result<Statement> {
        let mut select = Select::new(self.lower_table(meta)?);

        select.columns = vec![Column::count(column, AGGREGATE)];
        select.filter = lower_filter(state, meta);

        Ok(select.into())
    }

    /// Single-record insert: fillable filtering, timestamps, then casts.
    /// Returns the statement and the record as bound.
    pub(crate) fn lower_create(
        &self,
        values: Record,
        meta: &EntityMetadata,
    ) -> Result<(Statement, Record)> {
        let table = self.lower_table(meta)?;

        let mut record: Record = values
            .into_iter()
            .filter(|(field, _)| meta.is_fillable(field))
            .collect();

        let now = self.now();

        for field in [meta.created_field(), meta.updated_field()].into_iter().flatten() {
            if !record.contains_key(field) {
                record.insert(field, now.clone());
            }
        }

        let record = self.encode_record(record, meta)?;

        let insert = Insert {
            table,
            columns: record.keys().map(str::to_string).collect(),
            rows: vec![record.values().cloned().collect()],
        };

        Ok((insert.into(), record))
    }

    /// Multi-row insert. Every row must carry the first row's keys. Casts
    /// apply; fillable filtering and timestamps do not.
    pub(crate) fn lower_insert(
        &self,
        rows: Vec<Record>,
        meta: &EntityMetadata,
    ) -> Result<Statement> {
        let table = self.lower_table(meta)?;

        let columns: Vec<String> = match rows.first() {
            Some(first) => {
                let mismatch = rows.iter().enumerate().find(|(_, row)| !row.same_shape(first));

                if let Some((index, row)) = mismatch {
                    let actual: Vec<&str> = row.keys().collect();
                    let expected: Vec<&str> = first.keys().collect();
                    return Err(Error::mismatched_bulk_row(index, &expected, &actual));
                }

                first.keys().map(str::to_string).collect()
            }
            None => vec![],
        };

        let mut values = Vec::with_capacity(rows.len());

        for row in rows {
            let mut row = self.encode_record(row, meta)?;

            values.push(
                columns
                    .iter()
                    .map(|column| row.remove(column).unwrap_or_default())
                    .collect(),
            );
        }

        Ok(Insert {
            table,
            columns,
            rows: values,
        }
        .into())
    }

    /// `SET` assignments come from fillable fields plus a refreshed update
    /// timestamp, cast-encoded. Their bindings precede the WHERE bindings.
    pub(crate) fn lower_update(
        &self,
        state: &QueryState,
        values: Record,
        meta: &EntityMetadata,
    ) -> Result<Statement> {
        let table = self.lower_table(meta)?;

        if !state.has_wheres() && !meta.allow_bulk_update {
            warn!(table = %meta.table, "blocked update without a WHERE clause");
            return Err(Error::guard(GuardKind::BulkUpdate, &meta.table));
        }

        let mut record: Record = values
            .into_iter()
            .filter(|(field, _)| meta.is_fillable(field))
            .collect();

        if let Some(field) = meta.updated_field() {
            record.insert(field, self.now());
        }

        if record.is_empty() {
            return Err(Error::invalid_statement(format!(
                "update on `{}` has no fillable fields",
                meta.table
            )));
        }

        let assignments = self
            .encode_record(record, meta)?
            .into_iter()
            .map(|(column, value)| Assignment { column, value })
            .collect();

        Ok(Update {
            table,
            assignments,
            filter: lower_filter(state, meta),
        }
        .into())
    }

    /// A soft-deleting entity turns DELETE into an UPDATE stamping the
    /// soft-delete field. Both forms sit behind the bulk delete guard.
    pub(crate) fn lower_delete(
        &self,
        state: &QueryState,
        meta: &EntityMetadata,
    ) -> Result<Statement> {
        let table = self.lower_table(meta)?;

        if !state.has_wheres() && !meta.allow_bulk_delete {
            warn!(table = %meta.table, "blocked delete without a WHERE clause");
            return Err(Error::guard(GuardKind::BulkDelete, &meta.table));
        }

        let filter = lower_filter(state, meta);

        let Some(field) = meta.soft_delete_field() else {
            return Ok(Delete { table, filter }.into());
        };

        let value = self.encode_value(field, self.now(), meta)?;

        Ok(Update {
            table,
            assignments: vec![Assignment {
                column: field.to_string(),
                value,
            }],
            filter,
        }
        .into())
    }

    pub(crate) fn lower_truncate(&self, meta: &EntityMetadata) -> Result<Statement> {
        if !meta.allow_bulk_delete {
            warn!(table = %meta.table, "blocked truncate");
            return Err(Error::guard(GuardKind::BulkDelete, &meta.table));
        }

        Ok(Truncate {
            table: self.lower_table(meta)?,
        }
        .into())
    }

    pub(crate) fn lower_table(&self, meta: &EntityMetadata) -> Result<TableName> {
        meta.validate()?;
        Ok(TableName::new(&meta.table).with_schema(meta.schema_for(self.dialect())))
    }

    fn encode_record(&self, record: Record, meta: &EntityMetadata) -> Result<Record> {
        record
            .into_iter()
            .map(|(field, value)| {
                let value = self.encode_value(&field, value, meta)?;
                Ok((field, value))
            })
            .collect()
    }

    fn encode_value(&self, field: &str, value: Value, meta: &EntityMetadata) -> Result<Value> {
        match meta.cast_for(field) {
            Some(cast) => self.encode_cast(value, cast),
            None => Ok(value),
        }
    }

    fn encode_cast(&self, value: Value, cast: &Cast) -> Result<Value> {
        self.cx
            .casts()
            .encode(value, cast, &self.cx.cast_context())
    }

    fn now(&self) -> Value {
        Value::DateTime(Utc::now().with_timezone(&self.cx.timezone()))
    }
}

/// Pairs each predicate with its binding and adds the soft-delete scope.
fn lower_filter(state: &QueryState, meta: &EntityMetadata) -> Filter {
    debug_assert_eq!(
        state.placeholder_count(),
        state.bindings.len(),
        "WHERE bindings out of sync with predicates"
    );

    let mut bindings = state.bindings.iter().cloned();
    let mut filter = Filter::default();

    for clause in &state.wheres {
        let value = if clause.has_value { bindings.next() } else { None };

        filter.push(Condition::new(
            clause.column.clone(),
            clause.op,
            value,
            clause.boolean,
        ));
    }

    if let Some(field) = meta.soft_delete_field() {
        if !state.with_deleted {
            filter.push_scope(Condition::is_null(field));
        }
    }

    filter
}
