//! Process-level configuration shared by every [`Db`](crate::Db) handle.

use crate::Cache;

use querycraft_core::{CastContext, CastHandler, CastRegistry};

use chrono::{FixedOffset, Offset, Utc};
use std::{sync::Mutex, time::Duration};

/// SQL at or above this length is never cached.
pub const DEFAULT_CACHE_MAX_SQL_LEN: usize = 60;

/// Settings and shared state for query execution.
///
/// Built once and shared by reference; the cache and the debug query log
/// live here rather than in statics.
#[derive(Debug)]
pub struct ExecutionContext {
    cache: Cache,
    cache_enabled: bool,
    cache_max_sql_len: usize,
    debug: bool,
    queries: Mutex<Vec<QueryLogEntry>>,
    timezone: FixedOffset,
    encoding: String,
    casts: CastRegistry,
}

/// A statement recorded while debugging is on.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLogEntry {
    pub sql: String,
    pub elapsed: Duration,

    /// Served from the cache without touching the connection
    pub cached: bool,

    pub table: String,
}

#[derive(Debug)]
pub struct Builder {
    cache_enabled: bool,
    cache_max_sql_len: usize,
    debug: bool,
    timezone: FixedOffset,
    encoding: String,
    casts: CastRegistry,
}

impl ExecutionContext {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    pub fn cache_max_sql_len(&self) -> usize {
        self.cache_max_sql_len
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn casts(&self) -> &CastRegistry {
        &self.casts
    }

    pub fn cast_context(&self) -> CastContext {
        CastContext {
            timezone: self.timezone,
        }
    }

    /// Statements recorded so far. Empty unless `debug` is on.
    pub fn queries(&self) -> Vec<QueryLogEntry> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    pub fn clear_queries(&self) {
        if let Ok(mut queries) = self.queries.lock() {
            queries.clear();
        }
    }

    pub(crate) fn record_query(&self, entry: QueryLogEntry) {
        if !self.debug {
            return;
        }

        if let Ok(mut queries) = self.queries.lock() {
            queries.push(entry);
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Builder::default().build()
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            cache_enabled: true,
            cache_max_sql_len: DEFAULT_CACHE_MAX_SQL_LEN,
            debug: false,
            timezone: Utc.fix(),
            encoding: "UTF-8".to_string(),
            casts: CastRegistry::new(),
        }
    }
}

impl Builder {
    pub fn cache_enabled(&mut self, enabled: bool) -> &mut Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn cache_max_sql_len(&mut self, len: usize) -> &mut Self {
        self.cache_max_sql_len = len;
        self
    }

    /// Keep an in-memory log of every executed statement
    pub fn debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    pub fn timezone(&mut self, timezone: FixedOffset) -> &mut Self {
        self.timezone = timezone;
        self
    }

    pub fn encoding(&mut self, encoding: impl Into<String>) -> &mut Self {
        self.encoding = encoding.into();
        self
    }

    pub fn casts(&mut self, casts: CastRegistry) -> &mut Self {
        self.casts = casts;
        self
    }

    pub fn register_cast(
        &mut self,
        name: impl Into<String>,
        handler: impl CastHandler,
    ) -> &mut Self {
        self.casts.register(name, handler);
        self
    }

    pub fn build(&mut self) -> ExecutionContext {
        ExecutionContext {
            cache: Cache::new(),
            cache_enabled: self.cache_enabled,
            cache_max_sql_len: self.cache_max_sql_len,
            debug: self.debug,
            queries: Mutex::new(vec![]),
            timezone: self.timezone,
            encoding: self.encoding.clone(),
            casts: self.casts.clone(),
        }
    }
}
