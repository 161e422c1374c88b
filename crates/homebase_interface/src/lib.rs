//! Trait definitions for the Homebase pipeline.
//!
//! This crate holds the seams the pipeline is wired through: the
//! generation backend and the diagnostic sink.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod diagnostics;
mod traits;

pub use diagnostics::{DiagnosticEvent, RecordingSink, TracingSink};
pub use traits::{DiagnosticSink, GenerationBackend};
