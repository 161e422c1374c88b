//! Homebase - place recommendations from a generative model.
//!
//! Homebase sends a user's profile (a prompt or an uploaded document) to
//! Gemini, retries transient failures, and extracts the JSON payload the
//! model was instructed to return. Recommended places can then be enriched
//! with a map link, a photo and the commute from home via Google Places.
//!
//! # Quick Start
//!
//! ```no_run
//! use homebase::{GeminiClient, HomebaseConfig, ResponseExtractionPipeline, TracingSink};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HomebaseConfig::load()?;
//! let pipeline = ResponseExtractionPipeline::from_config(&config, GeminiClient::new, TracingSink)?;
//!
//! let places = pipeline
//!     .generate_from_prompt(
//!         "Return a fenced JSON array of places with name and address.",
//!         "I run, cook and have a dog; I'm moving to Denver.",
//!     )
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&places)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Homebase is organized as a workspace with focused crates:
//!
//! - `homebase_core` - Requests, responses and attempt outcomes
//! - `homebase_error` - Error types
//! - `homebase_interface` - `GenerationBackend` and `DiagnosticSink` traits
//! - `homebase_config` - Layered TOML configuration and API keys
//! - `homebase_models` - Gemini REST client
//! - `homebase_pipeline` - Retry loop and JSON extraction
//! - `homebase_google` - Drive and Places clients
//!
//! This crate (`homebase`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod telemetry;

pub use telemetry::init_tracing;

pub use homebase_config::{
    ApiKey, DriveSettings, FileInputSettings, GeminiSettings, HomebaseConfig, PlacesSettings,
    RetrySettings,
};
pub use homebase_core::{
    AttemptResult, ExtractedPayload, FILE_PREAMBLE, FailureKind, GenerationConfig,
    GenerationRequest, GenerationResponse, HarmCategory, PromptPart, ResponseDiagnostics,
    SEARCH_PREAMBLE, SafetyRating, SafetyThreshold, UnclassifiedPolicy,
};
pub use homebase_error::{
    ConfigError, ExtractionError, ExtractionErrorKind, GenerationError, GenerationErrorKind,
    HomebaseError, HomebaseErrorKind, HomebaseResult, HttpError, JsonError, PipelineError,
    PipelineErrorKind, RetryableError,
};
pub use homebase_google::{DriveClient, PlaceInfo, PlacesClient};
pub use homebase_interface::{
    DiagnosticEvent, DiagnosticSink, GenerationBackend, RecordingSink, TracingSink,
};
pub use homebase_models::GeminiClient;
pub use homebase_pipeline::{
    BackoffPolicy, ResponseExtractionPipeline, extract_json, stage_file_input, stage_file_input_in,
    try_extract_json,
};
