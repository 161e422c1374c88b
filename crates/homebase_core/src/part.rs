//! Prompt parts sent to a generation backend.

use serde::{Deserialize, Serialize};

/// One ordered element of a prompt.
///
/// # Examples
///
/// ```
/// use homebase_core::PromptPart;
///
/// let part = PromptPart::from("Find me a gym");
/// assert_eq!(part.as_text(), Some("Find me a gym"));
///
/// let bytes = PromptPart::Bytes {
///     mime: "text/plain".to_string(),
///     data: b"raw".to_vec(),
/// };
/// assert!(bytes.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PromptPart {
    /// Plain text.
    Text(String),
    /// Raw bytes with a MIME type, sent inline.
    Bytes {
        /// MIME type, e.g. "text/plain" or "application/pdf"
        mime: String,
        /// Raw content
        data: Vec<u8>,
    },
}

impl PromptPart {
    /// Returns the text if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PromptPart::Text(text) => Some(text),
            PromptPart::Bytes { .. } => None,
        }
    }

    /// Size of the part's content in bytes.
    pub fn len(&self) -> usize {
        match self {
            PromptPart::Text(text) => text.len(),
            PromptPart::Bytes { data, .. } => data.len(),
        }
    }

    /// Whether the part carries no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for PromptPart {
    fn from(text: String) -> Self {
        PromptPart::Text(text)
    }
}

impl From<&str> for PromptPart {
    fn from(text: &str) -> Self {
        PromptPart::Text(text.to_string())
    }
}
