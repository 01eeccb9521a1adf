use super::Error;

/// Error when the driver fails to prepare or execute a statement.
///
/// The compiled SQL is kept for debugging. Bound values are deliberately not
/// stored since they may hold secrets.
#[derive(Debug)]
pub(super) struct ExecutionError {
    pub(super) sql: Box<str>,
    pub(super) message: Box<str>,
}

impl std::error::Error for ExecutionError {}

impl core::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "query execution failed: {}; sql={}",
            self.message, self.sql
        )
    }
}

impl Error {
    /// Creates an execution error carrying the SQL that failed.
    pub fn execution(sql: impl Into<String>, driver_message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Execution(ExecutionError {
            sql: sql.into().into(),
            message: driver_message.into().into(),
        }))
    }

    /// Returns `true` if this error is an execution error.
    pub fn is_execution(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Execution(_))
    }

    /// The SQL attached to an execution error.
    pub fn execution_sql(&self) -> Option<&str> {
        match self.kind() {
            super::ErrorKind::Execution(err) => Some(&err.sql),
            _ => None,
        }
    }
}
