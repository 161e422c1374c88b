//! Pipeline outcome error types.

use homebase_core::FailureKind;

/// Terminal failures of the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Every attempt was consumed without a payload
    #[display("Failed to generate content after {} attempts (last failure: {})", attempts, last_failure)]
    Exhausted {
        /// Attempts made
        attempts: u32,
        /// Classification of the final failed attempt
        last_failure: FailureKind,
    },
    /// A failure the policy treats as fatal stopped the loop early
    #[display("Aborted on attempt {} ({}): {}", attempt, failure, reason)]
    Aborted {
        /// Attempt that failed
        attempt: u32,
        /// Classification of the failure
        failure: FailureKind,
        /// Backend message
        reason: String,
    },
    /// The uploaded file could not be staged or decoded
    #[display("Error handling file: {}", _0)]
    FileInput(String),
}

/// Pipeline error with source location tracking.
///
/// Returned as an ordinary value; exhaustion is an expected outcome.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when all attempts were consumed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, PipelineErrorKind::Exhausted { .. })
    }
}
