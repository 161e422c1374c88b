//! The retrying generate-then-extract loop.

use crate::{BackoffPolicy, stage_file_input, try_extract_json};
use homebase_config::{ApiKey, GeminiSettings, HomebaseConfig};
use homebase_core::{
    AttemptResult, ExtractedPayload, FailureKind, GenerationConfig, GenerationRequest,
    ResponseDiagnostics, UnclassifiedPolicy,
};
use homebase_error::{
    GenerationError, HomebaseResult, PipelineError, PipelineErrorKind, RetryableError,
};
use homebase_interface::{DiagnosticEvent, DiagnosticSink, GenerationBackend, TracingSink};
use serde_json::Value;
use std::io::Read;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{Level, debug, info, instrument};

/// Sends a request to a backend, retries transient failures and returns the
/// first JSON payload found in a reply.
///
/// Attempts are strictly sequential. Nothing is shared between runs, so one
/// pipeline may serve concurrent callers if its backend allows it.
///
/// Failure handling per attempt:
///
/// | failure | next step |
/// |---|---|
/// | no usable JSON in the reply | retry at once |
/// | deadline exceeded | wait the short delay |
/// | quota exhausted | wait the long delay |
/// | content blocked or malformed reply | record diagnostics, wait the short delay |
/// | unclassified | per [`UnclassifiedPolicy`]: wait the short delay, or abort |
///
/// No delay follows the final attempt.
pub struct ResponseExtractionPipeline<B, S = TracingSink> {
    backend: B,
    sink: S,
    generation_config: GenerationConfig,
    max_attempts: u32,
    backoff: BackoffPolicy,
    unclassified: UnclassifiedPolicy,
    byte_cap: usize,
}

impl<B, S> std::fmt::Debug for ResponseExtractionPipeline<B, S>
where
    B: GenerationBackend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseExtractionPipeline")
            .field("provider", &self.backend.provider_name())
            .field("model", &self.backend.model_name())
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .field("unclassified", &self.unclassified)
            .finish_non_exhaustive()
    }
}

impl<B, S> ResponseExtractionPipeline<B, S>
where
    B: GenerationBackend,
    S: DiagnosticSink,
{
    /// Pipeline with the built-in defaults: two attempts, 1s/10s backoff,
    /// unclassified failures retried, 900 000 byte file cap.
    pub fn new(backend: B, sink: S) -> Self {
        let defaults = HomebaseConfig::default();
        Self {
            backend,
            sink,
            generation_config: GenerationConfig::default(),
            max_attempts: defaults.retry.max_attempts,
            backoff: BackoffPolicy::from(&defaults.retry),
            unclassified: defaults.retry.unclassified,
            byte_cap: defaults.file_input.byte_cap,
        }
    }

    /// Builds a pipeline from configuration.
    ///
    /// The credential is resolved first; `factory` only runs once a key is
    /// in hand, so a missing key means no backend and no network call.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a missing key or invalid settings,
    /// or whatever `factory` returns.
    #[instrument(skip_all, fields(model = %config.gemini.model))]
    pub fn from_config<F>(config: &HomebaseConfig, factory: F, sink: S) -> HomebaseResult<Self>
    where
        F: FnOnce(ApiKey, &GeminiSettings) -> HomebaseResult<B>,
    {
        config.validate()?;
        let generation_config = config.to_generation_config()?;
        let api_key = config.gemini.api_key()?;
        let backend = factory(api_key, &config.gemini)?;

        debug!(
            provider = backend.provider_name(),
            max_attempts = config.retry.max_attempts,
            "Pipeline ready"
        );

        Ok(Self {
            backend,
            sink,
            generation_config,
            max_attempts: config.retry.max_attempts,
            backoff: BackoffPolicy::from(&config.retry),
            unclassified: config.retry.unclassified,
            byte_cap: config.file_input.byte_cap,
        })
    }

    /// Sets the attempt limit; values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the backoff policy.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the unclassified-failure policy.
    pub fn with_unclassified_policy(mut self, policy: UnclassifiedPolicy) -> Self {
        self.unclassified = policy;
        self
    }

    /// Sets the sampling configuration used by the convenience entry points.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    /// Sets the file input byte cap.
    pub fn with_byte_cap(mut self, byte_cap: usize) -> Self {
        self.byte_cap = byte_cap;
        self
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run with the configured attempt limit and backoff.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::Exhausted`] once every attempt failed, or
    /// [`PipelineErrorKind::Aborted`] when a failure is treated as fatal.
    pub async fn run(&self, request: &GenerationRequest) -> Result<ExtractedPayload, PipelineError> {
        self.run_with(request, self.max_attempts, &self.backoff).await
    }

    /// Run with an explicit attempt limit and backoff.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    #[instrument(
        skip(self, request, backoff),
        fields(provider = self.backend.provider_name(), model = self.backend.model_name())
    )]
    pub async fn run_with(
        &self,
        request: &GenerationRequest,
        max_attempts: u32,
        backoff: &BackoffPolicy,
    ) -> Result<ExtractedPayload, PipelineError> {
        let max_attempts = max_attempts.max(1);
        let attempts = AtomicU32::new(0);
        let strategy = FixedInterval::new(*backoff.short_delay()).take(max_attempts as usize - 1);

        let outcome = Retry::spawn(strategy, || async {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;

            let failure = match self.invoke(request, attempt, max_attempts).await {
                AttemptResult::Success(text) => match try_extract_json(&text) {
                    Ok(payload) => {
                        info!(attempt, max_attempts, "Extracted JSON payload");
                        self.sink.record(
                            DiagnosticEvent::new(Level::INFO, "Extracted JSON payload")
                                .with_field("attempt", attempt)
                                .with_field("max_attempts", max_attempts),
                        );
                        return Ok(payload);
                    }
                    Err(e) => {
                        self.sink.record(
                            DiagnosticEvent::new(Level::WARN, "No usable JSON in response")
                                .with_field("attempt", attempt)
                                .with_field("max_attempts", max_attempts)
                                .with_field("failure_kind", FailureKind::Extraction.as_ref())
                                .with_field("error", e.kind.to_string())
                                .with_field("response_chars", text.chars().count()),
                        );
                        FailureKind::Extraction
                    }
                },
                AttemptResult::TransientFailure(kind) => kind,
                AttemptResult::FatalFailure(kind, reason) => {
                    self.sink.record(
                        DiagnosticEvent::new(Level::ERROR, "Aborting after fatal failure")
                            .with_field("attempt", attempt)
                            .with_field("failure_kind", kind.as_ref())
                            .with_field("error", reason.clone()),
                    );
                    return Err(RetryError::Permanent(PipelineError::new(
                        PipelineErrorKind::Aborted {
                            attempt,
                            failure: kind,
                            reason,
                        },
                    )));
                }
            };

            // Extraction failures retry at once.
            let delay = backoff.delay_for(failure).unwrap_or(Duration::ZERO);
            if attempt < max_attempts && !delay.is_zero() {
                self.sink.record(
                    DiagnosticEvent::new(Level::DEBUG, "Waiting before next attempt")
                        .with_field("attempt", attempt)
                        .with_field("failure_kind", failure.as_ref())
                        .with_field("delay_ms", delay.as_millis() as u64),
                );
            }
            Err(RetryError::Transient {
                err: PipelineError::new(PipelineErrorKind::Exhausted {
                    attempts: attempt,
                    last_failure: failure,
                }),
                retry_after: Some(delay),
            })
        })
        .await;

        if let Err(e) = &outcome {
            if let PipelineErrorKind::Exhausted {
                attempts,
                last_failure,
            } = e.kind
            {
                self.sink.record(
                    DiagnosticEvent::new(
                        Level::ERROR,
                        "Failed to generate content after all attempts",
                    )
                    .with_field("attempts", attempts)
                    .with_field("last_failure", last_failure.as_ref()),
                );
            }
        }
        outcome
    }

    /// Answer a free-form prompt, preceded by the search preamble.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn generate_from_prompt(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<ExtractedPayload, PipelineError> {
        let request =
            GenerationRequest::for_prompt(system_instruction, prompt, self.generation_config.clone());
        self.run(&request).await
    }

    /// Answer from an uploaded file, preceded by the file preamble.
    ///
    /// The upload is staged through a temporary file on the blocking pool
    /// and capped at the configured byte limit before any backend call.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::FileInput`] if the upload cannot be
    /// staged, otherwise see [`run`](Self::run).
    pub async fn generate_from_file<R>(
        &self,
        system_instruction: &str,
        mut upload: R,
    ) -> Result<ExtractedPayload, PipelineError>
    where
        R: Read + Send + 'static,
    {
        let byte_cap = self.byte_cap;
        let content =
            tokio::task::spawn_blocking(move || stage_file_input(&mut upload, byte_cap))
                .await
                .map_err(|e| {
                    PipelineError::new(PipelineErrorKind::FileInput(format!(
                        "Staging task failed: {}",
                        e
                    )))
                })??;
        let request = GenerationRequest::for_file_content(
            system_instruction,
            content,
            self.generation_config.clone(),
        );
        self.run(&request).await
    }

    async fn invoke(
        &self,
        request: &GenerationRequest,
        attempt: u32,
        max_attempts: u32,
    ) -> AttemptResult {
        debug!(attempt, max_attempts, "Invoking backend");
        match self.backend.generate(request).await {
            Ok(response) => {
                self.sink.record(
                    DiagnosticEvent::new(Level::DEBUG, "Received response")
                        .with_field("attempt", attempt)
                        .with_field("response", response.text.clone()),
                );
                AttemptResult::Success(response.text)
            }
            Err(e) => self.classify(e, attempt, max_attempts),
        }
    }

    fn classify(&self, error: GenerationError, attempt: u32, max_attempts: u32) -> AttemptResult {
        let kind = error.failure_kind();
        let reason = error.kind.to_string();

        let mut event = DiagnosticEvent::new(Level::WARN, "Backend call failed")
            .with_field("attempt", attempt)
            .with_field("max_attempts", max_attempts)
            .with_field("failure_kind", kind.as_ref())
            .with_field("error", reason.clone());
        if let Some(diagnostics) = error.kind.diagnostics() {
            event = with_diagnostics(event, diagnostics);
        }
        self.sink.record(event);

        let retry = error.is_retryable()
            || (kind == FailureKind::Unclassified
                && !error.kind.is_fatal()
                && self.unclassified == UnclassifiedPolicy::Retry);
        if retry {
            AttemptResult::TransientFailure(kind)
        } else {
            AttemptResult::FatalFailure(kind, reason)
        }
    }
}

fn with_diagnostics(event: DiagnosticEvent, diagnostics: &ResponseDiagnostics) -> DiagnosticEvent {
    let ratings = serde_json::to_value(&diagnostics.safety_ratings).unwrap_or(Value::Null);
    event
        .with_field(
            "prompt_feedback",
            diagnostics.prompt_feedback.clone().map_or(Value::Null, Value::from),
        )
        .with_field(
            "finish_reason",
            diagnostics.finish_reason.clone().map_or(Value::Null, Value::from),
        )
        .with_field("safety_ratings", ratings)
}
