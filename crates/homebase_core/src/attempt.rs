//! Outcome of a single backend attempt.

use serde::{Deserialize, Serialize};

/// A JSON value (object or array) pulled out of a reply. The shape is up to
/// the caller.
pub type ExtractedPayload = serde_json::Value;

/// Classification of a failed attempt.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// The backend did not answer within its deadline.
    DeadlineExceeded,
    /// Quota or rate limit exhausted.
    ResourceExhausted,
    /// Blocked by a safety policy or structurally malformed reply.
    ContentPolicy,
    /// Reply arrived but held no usable JSON.
    Extraction,
    /// Anything the adapter could not classify.
    Unclassified,
}

/// Result of one backend invocation, as seen by the retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptResult {
    /// Raw reply text.
    Success(String),
    /// Worth another attempt.
    TransientFailure(FailureKind),
    /// Stop the loop.
    FatalFailure(FailureKind, String),
}

/// What the retry loop does with a failure the backend could not classify.
///
/// # Examples
///
/// ```
/// use homebase_core::UnclassifiedPolicy;
/// use std::str::FromStr;
///
/// assert_eq!(UnclassifiedPolicy::default(), UnclassifiedPolicy::Retry);
/// assert_eq!(UnclassifiedPolicy::from_str("abort").unwrap(), UnclassifiedPolicy::Abort);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnclassifiedPolicy {
    /// Wait the short delay and try again.
    #[default]
    Retry,
    /// Stop the loop on the first unclassified failure.
    Abort,
}
