use querycraft_core::{schema::EntityMetadata, stmt::Record, Result};

/// Builds a value from a hydrated row.
pub trait FromRecord: Sized + Send {
    fn from_record(record: Record) -> Result<Self>;
}

/// A type mapped to a table.
///
/// ```ignore
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl FromRecord for User {
///     fn from_record(record: Record) -> Result<Self> {
///         Ok(User {
///             id: record.get_as("id")?,
///             name: record.get_as("name")?,
///         })
///     }
/// }
///
/// impl Entity for User {
///     fn metadata() -> EntityMetadata {
///         EntityMetadata::builder(default_table_name("User"))
///             .fillable(["name"])
///             .build()
///     }
/// }
/// ```
pub trait Entity: FromRecord {
    fn metadata() -> EntityMetadata;
}

impl FromRecord for Record {
    fn from_record(record: Record) -> Result<Self> {
        Ok(record)
    }
}
