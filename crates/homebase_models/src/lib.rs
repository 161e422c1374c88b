//! Generation backend adapters for Homebase.
//!
//! # Example
//!
//! ```no_run
//! use homebase_config::HomebaseConfig;
//! use homebase_core::GenerationRequest;
//! use homebase_interface::GenerationBackend;
//! use homebase_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HomebaseConfig::load()?;
//! let client = GeminiClient::from_config(&config)?;
//! let request = GenerationRequest::for_prompt(
//!     "Answer with a fenced JSON object.",
//!     "Parks near Portland, OR",
//!     config.to_generation_config()?,
//! );
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::GeminiClient;
