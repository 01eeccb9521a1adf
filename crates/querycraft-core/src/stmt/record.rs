use super::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// A row keyed by column name, in column order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Removes a field, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Same set of keys, in any order.
    pub fn same_shape(&self, other: &Record) -> bool {
        self.len() == other.len() && other.keys().all(|key| self.contains_key(key))
    }

    /// Reads a field and converts it to `T`. Missing fields read as null.
    pub fn get_as<T>(&self, name: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        let value = self.fields.get(name).cloned().unwrap_or_default();
        T::try_from(value).map_err(|err| err.context(crate::err!("field `{name}`")))
    }

}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Record {
    fn from(fields: [(K, V); N]) -> Self {
        fields.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Extend<(String, Value)> for Record {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.fields.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut record = Record::from([("b", Value::I64(1)), ("a", Value::I64(2))]);
        record.insert("c", 3);
        assert_eq!(record.keys().collect::<Vec<_>>(), ["b", "a", "c"]);

        record.remove("a");
        assert_eq!(record.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn same_shape_ignores_key_order() {
        let record = Record::from([("a", 1), ("b", 2)]);

        assert!(record.same_shape(&Record::from([("b", 3), ("a", 4)])));
        assert!(!record.same_shape(&Record::from([("a", 1)])));
        assert!(!record.same_shape(&Record::from([("a", 1), ("c", 2)])));
        assert!(!Record::from([("a", 1)]).same_shape(&record));
    }

    #[test]
    fn get_as_reports_field() {
        let record = Record::from([("name", 3)]);
        let err = record.get_as::<String>("name").unwrap_err();
        assert_eq!(err.to_string(), "field `name`: cannot convert I64 to String");

        let missing: Option<String> = record.get_as("email").unwrap();
        assert_eq!(missing, None);
    }
}
