//! Core data types for the Homebase generation and extraction pipeline.
//!
//! This crate provides the plain data passed between the pipeline, the
//! generation backends and callers. It has no I/O of its own.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attempt;
mod generation_config;
mod part;
mod request;
mod response;

pub use attempt::{AttemptResult, ExtractedPayload, FailureKind, UnclassifiedPolicy};
pub use generation_config::{
    GenerationConfig, GenerationConfigBuilder, GenerationConfigBuilderError, HarmCategory,
    SafetyThreshold,
};
pub use part::PromptPart;
pub use request::{
    FILE_PREAMBLE, GenerationRequest, GenerationRequestBuilder, GenerationRequestBuilderError,
    SEARCH_PREAMBLE,
};
pub use response::{GenerationResponse, ResponseDiagnostics, SafetyRating};
