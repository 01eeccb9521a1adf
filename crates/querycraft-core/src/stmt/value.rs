use crate::{Error, Result};

use chrono::{DateTime, FixedOffset};

/// A scalar that flows between caller, builder, and driver.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Timestamp with an explicit offset
    DateTime(DateTime<FixedOffset>),

    /// 64-bit float
    F64(f64),

    /// Signed 64-bit integer
    I64(i64),

    /// Decoded JSON document
    Json(serde_json::Value),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// UUID, stored as text by drivers without a native type
    Uuid(uuid::Uuid),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Variant name, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::DateTime(_) => "DateTime",
            Value::F64(_) => "F64",
            Value::I64(_) => "I64",
            Value::Json(_) => "Json",
            Value::Null => "Null",
            Value::String(_) => "String",
            Value::Uuid(_) => "Uuid",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F64(v) => Some(v),
            Self::I64(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Converts the value into a JSON document.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Bool(v) => Json::Bool(*v),
            Value::DateTime(v) => Json::String(v.to_rfc3339()),
            Value::F64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::I64(v) => Json::from(*v),
            Value::Json(v) => v.clone(),
            Value::Null => Json::Null,
            Value::String(v) => Json::String(v.clone()),
            Value::Uuid(v) => Json::String(v.to_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I64(v) => Ok(v != 0),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<&i64> for Value {
    fn from(value: &i64) -> Self {
        Self::I64(*value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::I64(value.into())
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "i64")),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::type_conversion(value, "i32")),
            _ => Err(Error::type_conversion(value, "i32")),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I64(v) => Ok(v as f64),
            _ => Err(Error::type_conversion(value, "f64")),
        }
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl TryFrom<Value> for uuid::Uuid {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::String(v) => Ok(v.parse()?),
            _ => Err(Error::type_conversion(value, "uuid::Uuid")),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Json(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "serde_json::Value")),
        }
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = Error>,
{
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::try_from(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_conversions() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".into()));

        let v: Option<i64> = Value::Null.try_into().unwrap();
        assert_eq!(v, None);
        let v: Option<i64> = Value::I64(4).try_into().unwrap();
        assert_eq!(v, Some(4));
    }

    #[test]
    fn mismatched_conversion() {
        let err = String::try_from(Value::I64(1)).unwrap_err();
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert I64 to String");
    }

    #[test]
    fn to_json() {
        assert_eq!(Value::I64(3).to_json(), serde_json::json!(3));
        assert_eq!(Value::from("x").to_json(), serde_json::json!("x"));
        assert_eq!(Value::F64(f64::NAN).to_json(), serde_json::Value::Null);
    }
}
