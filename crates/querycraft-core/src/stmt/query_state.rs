use super::{Boolean, Direction, Op, OrderBy, Value, WhereClause};
use crate::{Error, Result};

use std::collections::HashMap;

/// Name used when a snapshot is taken or restored without one.
pub const DEFAULT_SNAPSHOT: &str = "default";

/// Mutable accumulator for one in-flight statement.
///
/// Every builder method appends; nothing is compiled until a terminal call
/// hands the state to the engine, which then [`reset`](Self::reset)s it.
/// Named snapshots survive resets so paged loops can re-run the same filter.
#[derive(Debug, Clone)]
pub struct QueryState {
    /// Projection, `["*"]` by default
    pub columns: Vec<String>,

    pub wheres: Vec<WhereClause>,

    /// Values in the order their placeholders appear in the WHERE clause
    pub bindings: Vec<Value>,

    pub order_by: Vec<OrderBy>,

    pub group_by: Vec<String>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,

    /// Skip the implicit soft-delete predicate
    pub with_deleted: bool,

    snapshots: HashMap<String, Snapshot>,
}

/// Saved copy of the filtering part of a [`QueryState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub columns: Vec<String>,
    pub wheres: Vec<WhereClause>,
    pub bindings: Vec<Value>,
    pub order_by: Vec<OrderBy>,
    pub group_by: Vec<String>,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            columns: vec!["*".to_string()],
            wheres: vec![],
            bindings: vec![],
            order_by: vec![],
            group_by: vec![],
            limit: None,
            offset: None,
            with_deleted: false,
            snapshots: HashMap::new(),
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();

        if self.columns.is_empty() {
            self.columns.push("*".to_string());
        }

        self
    }

    /// Appends a predicate. `value` is bound only when `op` takes one;
    /// `IS NULL` and `IS NOT NULL` drop it.
    pub fn push_where(
        &mut self,
        column: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
        boolean: Boolean,
    ) -> &mut Self {
        let has_value = op.takes_value();

        self.wheres.push(WhereClause {
            column: column.into(),
            op,
            has_value,
            boolean,
        });

        if has_value {
            self.bindings.push(value.into());
        }

        self
    }

    pub fn order_by(&mut self, column: impl Into<String>, direction: Direction) -> &mut Self {
        self.order_by.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn limit(&mut self, limit: u64, offset: Option<u64>) -> &mut Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    pub fn with_deleted(&mut self) -> &mut Self {
        self.with_deleted = true;
        self
    }

    pub fn has_wheres(&self) -> bool {
        !self.wheres.is_empty()
    }

    /// Number of WHERE placeholders the bindings must cover.
    pub fn placeholder_count(&self) -> usize {
        self.wheres.iter().filter(|clause| clause.has_value).count()
    }

    pub fn take_snapshot(&mut self, name: Option<&str>) -> &mut Self {
        let snapshot = Snapshot {
            columns: self.columns.clone(),
            wheres: self.wheres.clone(),
            bindings: self.bindings.clone(),
            order_by: self.order_by.clone(),
            group_by: self.group_by.clone(),
        };

        self.snapshots
            .insert(name.unwrap_or(DEFAULT_SNAPSHOT).to_string(), snapshot);
        self
    }

    /// Replaces the current filtering state with a saved snapshot.
    ///
    /// The pagination window is cleared so the caller can set a new one.
    pub fn restore_snapshot(&mut self, name: Option<&str>) -> Result<&mut Self> {
        let name = name.unwrap_or(DEFAULT_SNAPSHOT);

        let Some(snapshot) = self.snapshots.get(name) else {
            return Err(Error::invalid_statement(format!(
                "no snapshot named `{name}`"
            )));
        };

        self.columns = snapshot.columns.clone();
        self.wheres = snapshot.wheres.clone();
        self.bindings = snapshot.bindings.clone();
        self.order_by = snapshot.order_by.clone();
        self.group_by = snapshot.group_by.clone();
        self.limit = None;
        self.offset = None;

        Ok(self)
    }

    pub fn has_snapshot(&self, name: Option<&str>) -> bool {
        self.snapshots.contains_key(name.unwrap_or(DEFAULT_SNAPSHOT))
    }

    /// Restores the default configuration, keeping named snapshots.
    pub fn reset(&mut self) {
        let snapshots = std::mem::take(&mut self.snapshots);
        *self = QueryState {
            snapshots,
            ..QueryState::default()
        };
    }

    /// Moves the accumulated state out, leaving a reset builder behind.
    pub fn take(&mut self) -> QueryState {
        let snapshots = self.snapshots.clone();
        std::mem::replace(
            self,
            QueryState {
                snapshots,
                ..QueryState::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_appends_binding_in_call_order() {
        let mut state = QueryState::new();
        state
            .push_where("name", Op::Eq, "ann", Boolean::And)
            .push_where("deleted_at", Op::IsNull, Value::Null, Boolean::And)
            .push_where("age", Op::Gt, 30, Boolean::Or);

        assert_eq!(state.wheres.len(), 3);
        assert_eq!(state.placeholder_count(), 2);
        assert_eq!(
            state.bindings,
            vec![Value::String("ann".into()), Value::I64(30)]
        );
    }

    #[test]
    fn null_operators_drop_their_value() {
        let mut state = QueryState::new();
        state
            .push_where("deleted_at", Op::IsNotNull, "ignored", Boolean::And)
            .push_where("id", Op::Eq, Value::Null, Boolean::And);

        assert!(!state.wheres[0].has_value);
        assert!(state.wheres[1].has_value);
        assert_eq!(state.placeholder_count(), 1);
        assert_eq!(state.bindings, vec![Value::Null]);
    }

    #[test]
    fn reset_keeps_snapshots() {
        let mut state = QueryState::new();
        state
            .push_where("status", Op::Eq, "active", Boolean::And)
            .take_snapshot(Some("base"))
            .limit(10, Some(20));

        state.reset();
        assert!(!state.has_wheres());
        assert_eq!(state.columns, vec!["*"]);
        assert!(state.has_snapshot(Some("base")));

        state.restore_snapshot(Some("base")).unwrap();
        assert_eq!(state.wheres.len(), 1);
        assert_eq!(state.bindings, vec![Value::from("active")]);
        assert_eq!(state.limit, None);
    }

    #[test]
    fn restore_unknown_snapshot() {
        let mut state = QueryState::new();
        let err = state.restore_snapshot(None).unwrap_err();
        assert!(err.is_invalid_statement());
    }

    #[test]
    fn take_leaves_default_state() {
        let mut state = QueryState::new();
        state.select(["id", "name"]).limit(5, None).take_snapshot(None);

        let taken = state.take();
        assert_eq!(taken.columns, vec!["id", "name"]);
        assert_eq!(taken.limit, Some(5));
        assert_eq!(state.columns, vec!["*"]);
        assert_eq!(state.limit, None);
        assert!(state.has_snapshot(None));
    }
}
