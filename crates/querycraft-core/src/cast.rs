mod datetime;
mod json;
mod numeric;

use crate::{schema::Cast, stmt::Value, Error, Result};

use chrono::{FixedOffset, Offset, Utc};
use std::{collections::HashMap, fmt, sync::Arc};

/// A user-supplied conversion, registered by name.
pub trait CastHandler: Send + Sync + 'static {
    /// Raw stored value to the value handed to callers.
    fn decode(&self, value: Value, cx: &CastContext) -> Result<Value>;

    /// Caller value to the raw value bound into SQL.
    fn encode(&self, value: Value, cx: &CastContext) -> Result<Value>;
}

/// Settings casts need from the execution context.
#[derive(Debug, Clone, Copy)]
pub struct CastContext {
    pub timezone: FixedOffset,
}

impl Default for CastContext {
    fn default() -> Self {
        CastContext {
            timezone: Utc.fix(),
        }
    }
}

/// Dispatches [`Cast`]s to their conversions.
///
/// Built-in kinds are handled directly; [`Cast::Custom`] names are looked up
/// in the registered handlers when a value first needs them.
#[derive(Clone, Default)]
pub struct CastRegistry {
    handlers: HashMap<String, Arc<dyn CastHandler>>,
}

impl CastRegistry {
    pub fn new() -> CastRegistry {
        CastRegistry::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: impl CastHandler) -> &mut Self {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn decode(&self, value: Value, cast: &Cast, cx: &CastContext) -> Result<Value> {
        match cast {
            Cast::Int => Ok(numeric::decode_int(&value)),
            Cast::Float { .. } => Ok(numeric::decode_float(&value)),
            Cast::Datetime => datetime::decode(value, cx),
            Cast::Json => Ok(json::decode(value)),
            Cast::Custom(name) => self.handler(name)?.decode(value, cx),
        }
    }

    pub fn encode(&self, value: Value, cast: &Cast, cx: &CastContext) -> Result<Value> {
        match cast {
            Cast::Int => Ok(numeric::decode_int(&value)),
            Cast::Float { decimals } => Ok(numeric::encode_float(&value, *decimals)),
            Cast::Datetime => Ok(datetime::encode(value, cx)),
            Cast::Json => json::encode(value),
            Cast::Custom(name) => self.handler(name)?.encode(value, cx),
        }
    }

    fn handler(&self, name: &str) -> Result<&Arc<dyn CastHandler>> {
        self.handlers
            .get(name)
            .ok_or_else(|| Error::unknown_cast(name))
    }
}

impl fmt::Debug for CastRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("CastRegistry")
            .field("handlers", &names)
            .finish()
    }
}
