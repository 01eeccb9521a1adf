mod dialect;
pub use dialect::Dialect;

pub mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Rows};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// Opens connections to one database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// SQL dialect the database speaks.
    fn dialect(&self) -> Dialect;

    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A live session that runs compiled statements.
///
/// Each call is exactly one round-trip; the statement text is prepared by
/// the implementation and the parameters are bound positionally.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    fn dialect(&self) -> Dialect;

    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
