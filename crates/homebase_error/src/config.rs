//! Configuration error types.

/// Missing credential or invalid configuration, with source location.
///
/// Raised at construction time, before any network call.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use homebase_error::ConfigError;
    ///
    /// let err = ConfigError::new("retry.max_attempts must be at least 1");
    /// assert!(err.message.contains("max_attempts"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Missing or empty credential in the named environment variable.
    #[track_caller]
    pub fn missing_credential(env_var: &str) -> Self {
        Self::new(format!(
            "API key not found in environment variable '{}'",
            env_var
        ))
    }
}
