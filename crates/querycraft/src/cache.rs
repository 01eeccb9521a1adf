use querycraft_core::stmt::{Record, Value};
use querycraft_sql::Compiled;

use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
    sync::{Arc, RwLock},
};

/// Memo of SELECT results keyed by compiled SQL and bound parameters.
///
/// Entries live until a mutation on the same table invalidates them. A
/// poisoned lock is treated as an empty cache so reads fall through to the
/// database.
#[derive(Debug, Default)]
pub struct Cache {
    entries: RwLock<HashMap<CacheKey, Arc<Vec<Record>>>>,
}

/// Compiled SQL plus its parameters.
#[derive(Debug, Clone)]
pub struct CacheKey {
    sql: String,
    params: Vec<Value>,
}

impl CacheKey {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> CacheKey {
        CacheKey {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl From<&Compiled> for CacheKey {
    fn from(compiled: &Compiled) -> Self {
        CacheKey::new(compiled.sql.clone(), compiled.params.clone())
    }
}

impl Cache {
    pub fn new() -> Cache {
        Cache::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<Record>>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    pub fn set(&self, key: CacheKey, rows: Arc<Vec<Record>>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, rows);
        }
    }

    pub fn has(&self, key: &CacheKey) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    /// Drops every entry whose SQL reads from `table`, given as it appears in
    /// compiled SQL (quoted and schema-qualified).
    pub fn invalidate_table(&self, table: &str) -> Vec<CacheKey> {
        let needle = format!("FROM {table}");

        let Ok(mut entries) = self.entries.write() else {
            return vec![];
        };

        let removed: Vec<CacheKey> = entries
            .keys()
            .filter(|key| key.sql.contains(&needle))
            .cloned()
            .collect();

        for key in &removed {
            entries.remove(key);
        }

        removed
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.sql == other.sql
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| value_eq(a, b))
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sql.hash(state);
        self.params.len().hash(state);
        for value in &self.params {
            hash_value(value, state);
        }
    }
}

/// Floats compare by bit pattern so the key is a true equivalence relation.
fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
        (Value::Json(a), Value::Json(b)) => a.to_string() == b.to_string(),
        (a, b) => a == b,
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);

    match value {
        Value::Bool(v) => v.hash(state),
        Value::DateTime(v) => {
            v.timestamp().hash(state);
            v.timestamp_subsec_nanos().hash(state);
        }
        Value::F64(v) => v.to_bits().hash(state),
        Value::I64(v) => v.hash(state),
        Value::Json(v) => v.to_string().hash(state),
        Value::Null => {}
        Value::String(v) => v.hash(state),
        Value::Uuid(v) => v.hash(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: i64) -> Arc<Vec<Record>> {
        Arc::new(vec![querycraft_core::record! { "id" => n }])
    }

    #[test]
    fn bindings_are_part_of_the_key() {
        let cache = Cache::new();
        let sql = r#"SELECT * FROM "users" WHERE "id" = ?"#;

        cache.set(CacheKey::new(sql, vec![Value::I64(1)]), rows(1));

        assert!(cache.has(&CacheKey::new(sql, vec![Value::I64(1)])));
        assert!(!cache.has(&CacheKey::new(sql, vec![Value::I64(2)])));
        assert_eq!(cache.get(&CacheKey::new(sql, vec![Value::I64(1)])), Some(rows(1)));
    }

    #[test]
    fn invalidation_is_scoped_to_the_table() {
        let cache = Cache::new();
        cache.set(CacheKey::new(r#"SELECT * FROM "users""#, vec![]), rows(1));
        cache.set(CacheKey::new(r#"SELECT * FROM "users_archive""#, vec![]), rows(2));
        cache.set(CacheKey::new(r#"SELECT * FROM "posts""#, vec![]), rows(3));

        let removed = cache.invalidate_table(r#""users""#);

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].sql(), r#"SELECT * FROM "users""#);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn nan_keys_are_found() {
        let cache = Cache::new();
        let key = CacheKey::new("SELECT 1", vec![Value::F64(f64::NAN)]);
        cache.set(key.clone(), rows(1));
        assert!(cache.has(&key));
    }
}
