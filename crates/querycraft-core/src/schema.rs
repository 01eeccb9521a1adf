mod cast;
pub use cast::Cast;

mod entity;
pub use entity::{EntityMetadata, EntityMetadataBuilder, ReturnShape};

mod name;
pub use name::default_table_name;
