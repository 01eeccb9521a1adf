use super::Error;

/// Error when a statement cannot be built from the accumulated builder state.
///
/// This occurs when:
/// - An operator string is not one of the supported comparison operators
/// - An insert or update ends up with no writable fields
/// - A snapshot is restored under a name that was never taken
#[derive(Debug)]
pub(super) struct InvalidStatement {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidStatement(_))
    }
}
