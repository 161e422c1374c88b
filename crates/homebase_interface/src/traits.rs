//! Trait definitions for generation backends and diagnostic sinks.

use crate::DiagnosticEvent;
use async_trait::async_trait;
use homebase_core::{GenerationRequest, GenerationResponse};
use homebase_error::GenerationError;

/// Core trait that every text-generation backend implements.
///
/// A backend performs exactly one remote call per `generate` and never
/// retries on its own; retry policy lives in the pipeline.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a text reply for a request.
    ///
    /// Errors must be classified so the caller can pick a backoff.
    async fn generate(&self, req: &GenerationRequest)
    -> Result<GenerationResponse, GenerationError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-1.5-pro").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: GenerationBackend + ?Sized> GenerationBackend for Box<T> {
    async fn generate(
        &self,
        req: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Destination for structured pipeline diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: DiagnosticEvent);
}
