use crate::{stmt::Record, stmt::Value, Result};

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,

    /// Key generated by the last insert, when requested and available
    pub last_insert_id: Option<Value>,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows produced by the operation
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
            last_insert_id: None,
        }
    }

    pub fn values(values: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(values),
            last_insert_id: None,
        }
    }

    pub fn with_last_insert_id(mut self, id: impl Into<Value>) -> Self {
        self.last_insert_id = Some(id.into());
        self
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => crate::bail!("expected an affected-row count, got rows"),
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self {
            Rows::Values(values) => Ok(values),
            Rows::Count(_) => crate::bail!("expected rows, got an affected-row count"),
        }
    }
}
