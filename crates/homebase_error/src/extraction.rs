//! JSON extraction error types.

/// Why no payload could be pulled out of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// No ```json fence and no strippable markers
    #[display("No fenced JSON block found in response")]
    NoFencedBlock,
    /// The fenced content did not parse, even after un-escaping
    #[display("Fenced content is not valid JSON: {}", _0)]
    InvalidJson(String),
    /// Parsed, but to a scalar rather than an object or array
    #[display("Expected a JSON object or array, got {}", _0)]
    NotStructured(String),
}

/// Extraction error with source location tracking.
///
/// # Examples
///
/// ```
/// use homebase_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::NoFencedBlock);
/// assert!(err.to_string().contains("No fenced JSON block"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The kind of error that occurred
    pub kind: ExtractionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
