mod direction;
pub use direction::Direction;

mod op;
pub use op::{Boolean, Op};

mod order_by;
pub use order_by::OrderBy;

mod query_state;
pub use query_state::{QueryState, Snapshot, DEFAULT_SNAPSHOT};

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_chrono;

mod where_clause;
pub use where_clause::WhereClause;
