//! Error types for the Homebase library.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location it was raised at
//! - Constructors use `#[track_caller]` to capture that location
//!
//! Every error converts into [`HomebaseError`], so `?` works across crates.
//!
//! # Examples
//!
//! ```
//! use homebase_error::{ConfigError, HomebaseResult};
//!
//! fn load_key() -> HomebaseResult<String> {
//!     Err(ConfigError::new("GEMINI_API_KEY is not set"))?
//! }
//!
//! assert!(load_key().unwrap_err().to_string().contains("GEMINI_API_KEY"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod extraction;
mod generation;
mod http;
mod json;
mod pipeline;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{HomebaseError, HomebaseErrorKind, HomebaseResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use http::HttpError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
