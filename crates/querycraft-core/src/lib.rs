#[macro_use]
mod macros;

pub mod cast;
pub use cast::{CastContext, CastHandler, CastRegistry};

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, GuardKind, IntoError};

pub mod schema;

pub mod stmt;

pub use async_trait::async_trait;

/// A Result type alias that uses querycraft's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
