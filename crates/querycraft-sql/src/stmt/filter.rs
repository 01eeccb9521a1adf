use super::{Boolean, Op, Value};

/// WHERE clause of a statement.
///
/// `conditions` are the caller's predicates joined by their own boolean.
/// `scopes` are implicit predicates (soft delete) that always apply: they are
/// ANDed onto the caller's predicates as a group.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    pub conditions: Vec<Condition>,
    pub scopes: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: Op,

    /// Bound right-hand side. Present exactly when `op` takes a value.
    pub value: Option<Value>,

    pub boolean: Boolean,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.scopes.is_empty()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn push_scope(&mut self, condition: Condition) {
        self.scopes.push(condition);
    }
}

impl Condition {
    pub fn new(column: impl Into<String>, op: Op, value: Option<Value>, boolean: Boolean) -> Self {
        Condition {
            column: column.into(),
            op,
            value,
            boolean,
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::new(column, Op::Eq, Some(value.into()), Boolean::And)
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Condition::new(column, Op::IsNull, None, Boolean::And)
    }
}
