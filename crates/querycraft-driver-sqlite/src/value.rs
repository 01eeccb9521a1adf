use querycraft_core::{stmt::Value as CoreValue, Error, Result};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Reads column `index` of `row`, mapping SQLite storage classes onto
    /// core values. Blobs come back as lossy UTF-8 text.
    pub fn from_sql(row: &Row<'_>, index: usize) -> Result<Self> {
        let value = row.get_ref(index).map_err(Error::driver)?;

        let core_value = match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(value) => CoreValue::I64(value),
            ValueRef::Real(value) => CoreValue::F64(value),
            ValueRef::Text(value) | ValueRef::Blob(value) => {
                CoreValue::String(String::from_utf8_lossy(value).into_owned())
            }
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use CoreValue::*;

        match &self.0 {
            Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            DateTime(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format("%Y-%m-%d %H:%M:%S").to_string(),
            ))),
            Json(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Uuid(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
