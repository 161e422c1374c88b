//! Backend responses and their optional diagnostic fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One safety rating reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRating {
    /// Harm category, e.g. "HARM_CATEGORY_DANGEROUS_CONTENT"
    pub category: String,
    /// Probability bucket, e.g. "NEGLIGIBLE"
    pub probability: String,
    /// Whether this rating caused a block
    #[serde(default)]
    pub blocked: bool,
}

/// Optional diagnostic fields a backend may attach to a response.
///
/// Populated by the backend adapter, never inspected ad hoc by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDiagnostics {
    /// Prompt-level feedback, usually a block reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<String>,
    /// Why the first candidate stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Safety ratings of the first candidate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_ratings: Vec<SafetyRating>,
}

impl ResponseDiagnostics {
    /// True when no diagnostic field is present.
    pub fn is_empty(&self) -> bool {
        self.prompt_feedback.is_none()
            && self.finish_reason.is_none()
            && self.safety_ratings.is_empty()
    }

    /// Ratings rendered as `CATEGORY=PROBABILITY` pairs.
    pub fn safety_summary(&self) -> String {
        self.safety_ratings
            .iter()
            .map(|rating| {
                if rating.blocked {
                    format!("{}={} (blocked)", rating.category, rating.probability)
                } else {
                    format!("{}={}", rating.category, rating.probability)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ResponseDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prompt_feedback={}, finish_reason={}, safety_ratings=[{}]",
            self.prompt_feedback.as_deref().unwrap_or("none"),
            self.finish_reason.as_deref().unwrap_or("none"),
            self.safety_summary()
        )
    }
}

/// Successful backend reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Raw text of the reply
    pub text: String,
    /// Diagnostics attached by the backend
    #[serde(default)]
    pub diagnostics: ResponseDiagnostics,
}

impl GenerationResponse {
    /// Response with text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            diagnostics: ResponseDiagnostics::default(),
        }
    }
}
