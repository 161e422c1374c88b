//! Retrying generation and JSON extraction for Homebase.
//!
//! [`ResponseExtractionPipeline`] sends a request to a
//! [`GenerationBackend`](homebase_interface::GenerationBackend), retries
//! transient failures with a per-class [`BackoffPolicy`] and pulls a single
//! fenced JSON payload out of the reply text.
//!
//! # Example
//!
//! ```no_run
//! use homebase_config::HomebaseConfig;
//! use homebase_interface::TracingSink;
//! use homebase_models::GeminiClient;
//! use homebase_pipeline::ResponseExtractionPipeline;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HomebaseConfig::load()?;
//! let pipeline = ResponseExtractionPipeline::from_config(&config, GeminiClient::new, TracingSink)?;
//! let places = pipeline
//!     .generate_from_prompt("Answer with a fenced JSON array of places.", "quiet parks in Austin")
//!     .await?;
//! println!("{}", places);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backoff;
mod extraction;
mod file_input;
mod pipeline;

pub use backoff::BackoffPolicy;
pub use extraction::{extract_json, try_extract_json};
pub use file_input::{stage_file_input, stage_file_input_in};
pub use pipeline::ResponseExtractionPipeline;
