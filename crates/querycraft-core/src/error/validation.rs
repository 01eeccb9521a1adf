use super::Error;

/// Error when caller-supplied data is rejected before reaching the database.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// A bulk insert row does not carry the same keys as the first row.
    MismatchedRow {
        index: usize,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Free-form validation failure
    Message(Box<str>),
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("validation failed: ")?;

        match &self.kind {
            ValidationErrorKind::MismatchedRow {
                index,
                expected,
                actual,
            } => write!(
                f,
                "row {} has keys [{}] but the first row has keys [{}]",
                index,
                actual.join(", "),
                expected.join(", ")
            ),
            ValidationErrorKind::Message(message) => f.write_str(message),
        }
    }
}

impl Error {
    /// Creates a validation error with a free-form message.
    pub fn validation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Message(message.into().into()),
        }))
    }

    /// Creates a validation error for a heterogeneous bulk insert.
    pub fn mismatched_bulk_row(
        index: usize,
        expected: &[impl AsRef<str>],
        actual: &[impl AsRef<str>],
    ) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::MismatchedRow {
                index,
                expected: key_list(expected),
                actual: key_list(actual),
            },
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}

fn key_list(keys: &[impl AsRef<str>]) -> Vec<String> {
    keys.iter().map(|key| key.as_ref().to_string()).collect()
}
