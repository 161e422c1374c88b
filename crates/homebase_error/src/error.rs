//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ExtractionError, GenerationError, HttpError, JsonError,
    PipelineError,
};

/// Every error condition a Homebase crate can report.
///
/// # Examples
///
/// ```
/// use homebase_error::{HomebaseError, HttpError};
///
/// let err: HomebaseError = HttpError::new("connection reset").into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HomebaseErrorKind {
    /// Missing credential or invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generation backend failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// No usable JSON in a reply
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Retry loop gave up
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// HTTP failure in an auxiliary client
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Invalid builder input
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Homebase error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Homebase Error: {}", _0)]
pub struct HomebaseError(Box<HomebaseErrorKind>);

impl HomebaseError {
    /// Create a new error from a kind.
    pub fn new(kind: HomebaseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HomebaseErrorKind {
        &self.0
    }

    /// True for a missing credential or bad configuration.
    pub fn is_config(&self) -> bool {
        matches!(*self.0, HomebaseErrorKind::Config(_))
    }
}

impl<T> From<T> for HomebaseError
where
    T: Into<HomebaseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Homebase operations.
pub type HomebaseResult<T> = std::result::Result<T, HomebaseError>;
