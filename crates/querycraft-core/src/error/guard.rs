use super::Error;

/// The destructive operation a guard blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    BulkDelete,
    BulkUpdate,
}

/// Error when a table-wide mutation is attempted without an explicit opt-in.
#[derive(Debug)]
pub(super) struct GuardError {
    pub(super) kind: GuardKind,
    pub(super) table: Box<str>,
}

impl std::error::Error for GuardError {}

impl core::fmt::Display for GuardError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let (op, flag) = match self.kind {
            GuardKind::BulkDelete => ("delete", "allow_bulk_delete"),
            GuardKind::BulkUpdate => ("update", "allow_bulk_update"),
        };

        write!(
            f,
            "refusing bulk {op} on `{}` without a WHERE clause; set `{flag}` to opt in",
            self.table
        )
    }
}

impl Error {
    /// Creates a bulk-mutation guard error.
    pub fn guard(kind: GuardKind, table: &str) -> Error {
        Error::from(super::ErrorKind::Guard(GuardError {
            kind,
            table: table.into(),
        }))
    }

    /// Returns `true` if this error is a guard error.
    pub fn is_guard(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Guard(_))
    }
}
