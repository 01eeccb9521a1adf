mod cache;
pub use cache::{Cache, CacheKey};

pub mod context;
pub use context::{ExecutionContext, QueryLogEntry};

pub mod db;
pub use db::Db;

mod engine;

mod entity;
pub use entity::{Entity, FromRecord};

mod query;
pub use query::Query;

pub use querycraft_core::{
    driver::{self, Dialect},
    record,
    schema::{default_table_name, Cast, EntityMetadata, ReturnShape},
    stmt::{Direction, Op, Record, Value},
    CastContext, CastHandler, CastRegistry, Error, GuardKind, Result,
};
pub use querycraft_sql::Compiled;
