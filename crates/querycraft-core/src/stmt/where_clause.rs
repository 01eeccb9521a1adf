use super::{Boolean, Op};

/// A single WHERE predicate.
///
/// The bound value, if any, lives in [`QueryState::bindings`](super::QueryState)
/// at the position matching this clause's placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub op: Op,
    pub has_value: bool,
    pub boolean: Boolean,
}
