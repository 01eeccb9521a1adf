use super::Error;

/// Error when the query layer is configured incorrectly.
///
/// This occurs when:
/// - An entity has no table name
/// - A declared cast names a handler that was never registered
/// - A connection URL names a driver that is not available
///
/// These are never retried. Cast names are resolved lazily, so an unknown cast
/// surfaces the first time a row touching that field is read or written.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    pub(super) message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Creates a configuration error for a cast name missing from the registry.
    pub fn unknown_cast(name: &str) -> Error {
        Error::configuration(format!("cast `{name}` is not registered"))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
