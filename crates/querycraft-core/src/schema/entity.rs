use super::Cast;
use crate::{driver::Dialect, Error, Result};

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

/// Static description of a mapped table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityMetadata {
    pub table: String,

    #[serde(default)]
    pub schema: Option<String>,

    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Writable fields for `create`/`update`. Empty means every field.
    #[serde(default)]
    pub fillable: IndexSet<String>,

    /// Fields stripped from hydrated entities
    #[serde(default)]
    pub hidden: IndexSet<String>,

    #[serde(default)]
    pub casts: IndexMap<String, Cast>,

    #[serde(default = "enabled", rename = "timestamps")]
    pub timestamps_enabled: bool,

    #[serde(default = "default_created_field")]
    pub created_field: Option<String>,

    #[serde(default = "default_updated_field")]
    pub updated_field: Option<String>,

    #[serde(default)]
    pub soft_delete_field: Option<String>,

    #[serde(default)]
    pub allow_bulk_delete: bool,

    #[serde(default)]
    pub allow_bulk_update: bool,

    #[serde(default = "enabled", rename = "cache")]
    pub cache_enabled: bool,

    #[serde(default)]
    pub return_shape: ReturnShape,
}

/// How selected rows are handed back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnShape {
    /// Rows exactly as the driver returned them
    Raw,

    /// Rows with casts applied and hidden fields removed
    #[default]
    Entity,
}

#[derive(Debug)]
pub struct EntityMetadataBuilder {
    meta: EntityMetadata,
}

const DATETIME: &Cast = &Cast::Datetime;

fn default_primary_key() -> String {
    "id".to_string()
}

fn default_created_field() -> Option<String> {
    Some("created_at".to_string())
}

fn default_updated_field() -> Option<String> {
    Some("updated_at".to_string())
}

fn enabled() -> bool {
    true
}

impl EntityMetadata {
    pub fn new(table: impl Into<String>) -> EntityMetadata {
        EntityMetadata {
            table: table.into(),
            schema: None,
            primary_key: default_primary_key(),
            fillable: IndexSet::new(),
            hidden: IndexSet::new(),
            casts: IndexMap::new(),
            timestamps_enabled: true,
            created_field: default_created_field(),
            updated_field: default_updated_field(),
            soft_delete_field: None,
            allow_bulk_delete: false,
            allow_bulk_update: false,
            cache_enabled: true,
            return_shape: ReturnShape::Entity,
        }
    }

    pub fn builder(table: impl Into<String>) -> EntityMetadataBuilder {
        EntityMetadataBuilder {
            meta: EntityMetadata::new(table),
        }
    }

    /// Parses a JSON declaration, e.g.
    /// `{"table": "users", "casts": {"age": "int"}, "soft_delete_field": "deleted_at"}`.
    pub fn from_json(src: &str) -> Result<EntityMetadata> {
        serde_json::from_str(src)
            .map_err(|err| Error::configuration(format!("invalid entity metadata: {err}")))
    }

    /// Checks what must hold before any statement is compiled.
    pub fn validate(&self) -> Result<()> {
        if self.table.trim().is_empty() {
            return Err(Error::configuration("table name is required"));
        }

        Ok(())
    }

    /// Schema the table is qualified with under `dialect`.
    pub fn schema_for(&self, dialect: Dialect) -> Option<&str> {
        self.schema.as_deref().or(dialect.default_schema())
    }

    pub fn created_field(&self) -> Option<&str> {
        self.created_field
            .as_deref()
            .filter(|_| self.timestamps_enabled)
    }

    pub fn updated_field(&self) -> Option<&str> {
        self.updated_field
            .as_deref()
            .filter(|_| self.timestamps_enabled)
    }

    pub fn soft_delete_field(&self) -> Option<&str> {
        self.soft_delete_field.as_deref()
    }

    pub fn is_fillable(&self, field: &str) -> bool {
        self.fillable.is_empty() || self.fillable.contains(field)
    }

    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden.contains(field)
    }

    fn is_datetime_field(&self, field: &str) -> bool {
        self.created_field() == Some(field)
            || self.updated_field() == Some(field)
            || self.soft_delete_field() == Some(field)
    }

    /// Cast applied to `field`. Timestamp and soft-delete fields are always
    /// datetimes, whatever the declared casts say.
    pub fn cast_for(&self, field: &str) -> Option<&Cast> {
        if self.is_datetime_field(field) {
            return Some(DATETIME);
        }

        self.casts.get(field)
    }
}

impl EntityMetadataBuilder {
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.meta.schema = Some(schema.into());
        self
    }

    pub fn primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.meta.primary_key = primary_key.into();
        self
    }

    pub fn fillable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.fillable.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn hidden<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.hidden.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn cast(mut self, field: impl Into<String>, cast: Cast) -> Self {
        self.meta.casts.insert(field.into(), cast);
        self
    }

    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.meta.timestamps_enabled = enabled;
        self
    }

    pub fn created_field(mut self, field: Option<&str>) -> Self {
        self.meta.created_field = field.map(str::to_string);
        self
    }

    pub fn updated_field(mut self, field: Option<&str>) -> Self {
        self.meta.updated_field = field.map(str::to_string);
        self
    }

    pub fn soft_delete_field(mut self, field: impl Into<String>) -> Self {
        self.meta.soft_delete_field = Some(field.into());
        self
    }

    pub fn allow_bulk_delete(mut self, allow: bool) -> Self {
        self.meta.allow_bulk_delete = allow;
        self
    }

    pub fn allow_bulk_update(mut self, allow: bool) -> Self {
        self.meta.allow_bulk_update = allow;
        self
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.meta.cache_enabled = enabled;
        self
    }

    pub fn return_shape(mut self, shape: ReturnShape) -> Self {
        self.meta.return_shape = shape;
        self
    }

    pub fn build(self) -> EntityMetadata {
        self.meta
    }
}
