use super::CastContext;
use crate::{stmt::Value, Error, Result};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses strings into `DateTime` values in the context timezone. Values that
/// are not strings are returned untouched.
pub(super) fn decode(value: Value, cx: &CastContext) -> Result<Value> {
    let Value::String(src) = &value else {
        return Ok(match value {
            Value::DateTime(dt) => Value::DateTime(dt.with_timezone(&cx.timezone)),
            value => value,
        });
    };

    let src = src.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(src) {
        return Ok(Value::DateTime(dt.with_timezone(&cx.timezone)));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(src, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(src, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        });

    match naive.and_then(|naive| naive.and_local_timezone(cx.timezone).single()) {
        Some(dt) => Ok(Value::DateTime(dt)),
        None => Err(Error::type_conversion(value, "DateTime")),
    }
}

/// Formats `DateTime` values as `YYYY-MM-DD HH:MM:SS` in the context timezone.
pub(super) fn encode(value: Value, cx: &CastContext) -> Value {
    match value {
        Value::DateTime(dt) => Value::String(
            dt.with_timezone(&cx.timezone)
                .format(STORAGE_FORMAT)
                .to_string(),
        ),
        value => value,
    }
}
