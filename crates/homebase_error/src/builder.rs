//! Builder-related errors.

/// Specific builder error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// Missing required field
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// Validation failed
    #[display("Validation failed: {}", _0)]
    ValidationFailed(String),
}

/// Builder error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

impl From<homebase_core::GenerationRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: homebase_core::GenerationRequestBuilderError) -> Self {
        match err {
            homebase_core::GenerationRequestBuilderError::UninitializedField(field) => {
                Self::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            other => Self::new(BuilderErrorKind::ValidationFailed(other.to_string())),
        }
    }
}

impl From<homebase_core::GenerationConfigBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: homebase_core::GenerationConfigBuilderError) -> Self {
        match err {
            homebase_core::GenerationConfigBuilderError::UninitializedField(field) => {
                Self::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            other => Self::new(BuilderErrorKind::ValidationFailed(other.to_string())),
        }
    }
}
