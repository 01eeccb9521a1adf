pub mod serializer;
pub use serializer::{Compiled, Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::Statement;
