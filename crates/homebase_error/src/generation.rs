//! Generation backend error types and retry classification.

use homebase_core::{FailureKind, ResponseDiagnostics};

/// Failure conditions a generation backend can surface.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not available to the backend
    #[display("API key not found in environment variable '{}'", _0)]
    MissingApiKey(String),
    /// The call did not complete in time
    #[display("Deadline exceeded: {}", _0)]
    DeadlineExceeded(String),
    /// Quota or rate limit exhausted
    #[display("Resource exhausted: {}", _0)]
    ResourceExhausted(String),
    /// The reply carried no text because a safety policy blocked it
    #[display("Content blocked ({})", _0)]
    ContentBlocked(ResponseDiagnostics),
    /// The reply could not be decoded
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Any other non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Connection-level failure
    #[display("Transport error: {}", _0)]
    Transport(String),
}

impl GenerationErrorKind {
    /// Maps the condition onto the retry loop's failure taxonomy.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            GenerationErrorKind::DeadlineExceeded(_) => FailureKind::DeadlineExceeded,
            GenerationErrorKind::ResourceExhausted(_) => FailureKind::ResourceExhausted,
            GenerationErrorKind::ContentBlocked(_) | GenerationErrorKind::MalformedResponse(_) => {
                FailureKind::ContentPolicy
            }
            GenerationErrorKind::MissingApiKey(_)
            | GenerationErrorKind::Http { .. }
            | GenerationErrorKind::Transport(_) => FailureKind::Unclassified,
        }
    }

    /// Diagnostics attached to a blocked reply.
    pub fn diagnostics(&self) -> Option<&ResponseDiagnostics> {
        match self {
            GenerationErrorKind::ContentBlocked(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }

    /// Conditions no retry can fix.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GenerationErrorKind::MissingApiKey(_))
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use homebase_core::FailureKind;
/// use homebase_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::ResourceExhausted(
///     "quota exceeded".to_string(),
/// ));
/// assert!(err.is_retryable());
/// assert_eq!(err.failure_kind(), FailureKind::ResourceExhausted);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Errors that know whether another attempt could succeed.
pub trait RetryableError {
    /// Returns true when the failure is transient by classification.
    ///
    /// Deadline, quota and content-policy failures are transient.
    /// Unclassified failures return false; callers decide their policy.
    fn is_retryable(&self) -> bool;

    /// Classification used to pick a backoff delay.
    fn failure_kind(&self) -> FailureKind;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        !self.kind.is_fatal() && self.kind.failure_kind() != FailureKind::Unclassified
    }

    fn failure_kind(&self) -> FailureKind {
        self.kind.failure_kind()
    }
}
