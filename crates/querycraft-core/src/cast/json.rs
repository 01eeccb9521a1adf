use crate::{stmt::Value, Result};

/// Parses JSON text. Empty or invalid text is returned as-is.
pub(super) fn decode(value: Value) -> Value {
    match value {
        Value::String(src) if !src.trim().is_empty() => {
            match serde_json::from_str::<serde_json::Value>(&src) {
                Ok(json) => Value::Json(json),
                Err(_) => Value::String(src),
            }
        }
        value => value,
    }
}

/// Serializes to JSON text. Null encodes to an empty array.
pub(super) fn encode(value: Value) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::String("[]".to_string()));
    }

    Ok(Value::String(serde_json::to_string(&value.to_json())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_json_text() {
        assert_eq!(decode(r#"{"a":[1,2]}"#.into()), Value::Json(json!({"a": [1, 2]})));
    }

    #[test]
    fn decode_falls_back_to_raw() {
        assert_eq!(decode("{oops".into()), Value::from("{oops"));
        assert_eq!(decode("".into()), Value::from(""));
        assert_eq!(decode(Value::Null), Value::Null);
    }

    #[test]
    fn encode_values() {
        assert_eq!(encode(Value::Json(json!([1, 2]))).unwrap(), Value::from("[1,2]"));
        assert_eq!(encode(Value::Null).unwrap(), Value::from("[]"));
        assert_eq!(encode(Value::from("a")).unwrap(), Value::from("\"a\""));
    }
}
