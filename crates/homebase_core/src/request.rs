//! Generation requests.

use crate::{GenerationConfig, PromptPart};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Lead-in sent ahead of a free-form search prompt.
pub const SEARCH_PREAMBLE: &str = "Follow the system instructions and";

/// Lead-in sent ahead of uploaded file content.
pub const FILE_PREAMBLE: &str = "Follow the system instructions";

/// A single generation call: system instruction, ordered prompt parts and
/// sampling configuration.
///
/// Immutable once built. The builder rejects an empty part sequence and
/// out-of-range sampling parameters.
///
/// # Examples
///
/// ```
/// use homebase_core::{GenerationRequest, PromptPart};
///
/// let request = GenerationRequest::builder()
///     .system_instruction("Answer with a JSON object.")
///     .parts(vec![PromptPart::from("List three parks")])
///     .build()
///     .unwrap();
/// assert_eq!(request.parts().len(), 1);
///
/// let empty = GenerationRequest::builder()
///     .system_instruction("Answer with a JSON object.")
///     .parts(Vec::<PromptPart>::new())
///     .build();
/// assert!(empty.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(try_from = "RawGenerationRequest")]
pub struct GenerationRequest {
    /// Instruction applied to the whole conversation.
    system_instruction: String,
    /// Prompt content in send order.
    parts: Vec<PromptPart>,
    /// Sampling and safety configuration.
    #[builder(default)]
    config: GenerationConfig,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Request for a free-form prompt, preceded by [`SEARCH_PREAMBLE`].
    pub fn for_prompt(
        system_instruction: impl Into<String>,
        prompt: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            parts: vec![
                PromptPart::from(SEARCH_PREAMBLE),
                PromptPart::Text(prompt.into()),
            ],
            config,
        }
    }

    /// Request for uploaded file content, preceded by [`FILE_PREAMBLE`].
    pub fn for_file_content(
        system_instruction: impl Into<String>,
        content: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            parts: vec![
                PromptPart::from(FILE_PREAMBLE),
                PromptPart::Text(content.into()),
            ],
            config,
        }
    }

    /// Total size of all prompt parts in bytes.
    pub fn prompt_len(&self) -> usize {
        self.parts.iter().map(PromptPart::len).sum()
    }
}

/// Unchecked wire form. The nested config validates itself.
#[derive(Deserialize)]
struct RawGenerationRequest {
    system_instruction: String,
    parts: Vec<PromptPart>,
    config: GenerationConfig,
}

impl TryFrom<RawGenerationRequest> for GenerationRequest {
    type Error = String;

    fn try_from(raw: RawGenerationRequest) -> Result<Self, Self::Error> {
        check_parts(&raw.parts)?;
        Ok(Self {
            system_instruction: raw.system_instruction,
            parts: raw.parts,
            config: raw.config,
        })
    }
}

fn check_parts(parts: &[PromptPart]) -> Result<(), String> {
    if parts.is_empty() {
        return Err("a generation request needs at least one prompt part".to_string());
    }
    Ok(())
}

impl GenerationRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(parts) = &self.parts {
            check_parts(parts)?;
        }
        if let Some(config) = &self.config {
            config.validate()?;
        }
        Ok(())
    }
}
