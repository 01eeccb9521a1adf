use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::stmt::Value;
use crate::Error;

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

/// Naive timestamps are taken to be UTC.
impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value.and_utc().fixed_offset())
    }
}

macro_rules! impl_try_from_datetime {
    ($chrono:ty, $lit:literal, |$dt:ident| $convert:expr) => {
        impl TryFrom<Value> for $chrono {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::DateTime($dt) => Ok($convert),
                    _ => Err(Error::type_conversion(value, $lit)),
                }
            }
        }
    };
}

impl_try_from_datetime!(DateTime<FixedOffset>, "DateTime<FixedOffset>", |dt| dt);
impl_try_from_datetime!(DateTime<Utc>, "DateTime<Utc>", |dt| dt.with_timezone(&Utc));
impl_try_from_datetime!(NaiveDateTime, "NaiveDateTime", |dt| dt.naive_local());
