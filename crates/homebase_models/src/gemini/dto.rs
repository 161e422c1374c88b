//! Gemini `generateContent` wire types.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use homebase_core::{GenerationRequest, PromptPart, ResponseDiagnostics, SafetyRating};
use serde::{Deserialize, Serialize};

//
// ─── REQUEST ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: WireGenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

impl From<&PromptPart> for Part {
    fn from(part: &PromptPart) -> Self {
        match part {
            PromptPart::Text(text) => Part::Text { text: text.clone() },
            PromptPart::Bytes { mime, data } => Part::Inline {
                inline_data: InlineData {
                    mime_type: mime.clone(),
                    data: STANDARD.encode(data),
                },
            },
        }
    }
}

impl From<&GenerationRequest> for GeminiRequest {
    fn from(req: &GenerationRequest) -> Self {
        let config = req.config();
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: req.system_instruction().clone(),
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: req.parts().iter().map(Part::from).collect(),
            }],
            generation_config: WireGenerationConfig {
                temperature: *config.temperature(),
                top_p: *config.top_p(),
                top_k: Some(*config.top_k()).filter(|k| *k > 0),
            },
            safety_settings: vec![SafetySetting {
                category: config.harm_category().to_string(),
                threshold: config.safety_threshold().to_string(),
            }],
        }
    }
}

//
// ─── RESPONSE ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Deserialize)]
struct WireSafetyRating {
    category: String,
    probability: String,
    #[serde(default)]
    blocked: bool,
}

impl From<&WireSafetyRating> for SafetyRating {
    fn from(rating: &WireSafetyRating) -> Self {
        SafetyRating {
            category: rating.category.clone(),
            probability: rating.probability.clone(),
            blocked: rating.blocked,
        }
    }
}

impl GeminiResponse {
    /// Prompt feedback, finish reason and safety ratings, whichever are present.
    pub(crate) fn diagnostics(&self) -> ResponseDiagnostics {
        let first = self.candidates.first();
        let candidate_ratings = first.map(|c| c.safety_ratings.as_slice()).unwrap_or(&[]);
        let ratings = if candidate_ratings.is_empty() {
            self.prompt_feedback
                .as_ref()
                .map(|feedback| feedback.safety_ratings.as_slice())
                .unwrap_or(&[])
        } else {
            candidate_ratings
        };

        ResponseDiagnostics {
            prompt_feedback: self
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.clone()),
            finish_reason: first.and_then(|c| c.finish_reason.clone()),
            safety_ratings: ratings.iter().map(SafetyRating::from).collect(),
        }
    }

    /// Concatenated text parts of the first candidate, if it has any.
    pub(crate) fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

//
// ─── ERRORS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub(crate) error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use homebase_core::GenerationConfig;
    use serde_json::json;

    #[test]
    fn request_body_uses_wire_names() {
        let request = GenerationRequest::builder()
            .system_instruction("sys")
            .parts(vec![
                PromptPart::from("hello"),
                PromptPart::Bytes {
                    mime: "text/plain".to_string(),
                    data: b"hi".to_vec(),
                },
            ])
            .config(GenerationConfig::default())
            .build()
            .unwrap();

        let body = serde_json::to_value(GeminiRequest::from(&request)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            body["contents"][0]["parts"][1]["inlineData"],
            json!({"mimeType": "text/plain", "data": "aGk="})
        );
        assert_eq!(body["generationConfig"]["topP"], json!(0.95_f32));
        assert!(body["generationConfig"].get("topK").is_none());
        assert_eq!(
            body["safetySettings"][0],
            json!({"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"})
        );
    }

    #[test]
    fn blocked_prompt_has_no_text_but_keeps_feedback() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [
                    {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "HIGH", "blocked": true}
                ]
            }
        }))
        .unwrap();

        assert!(response.text().is_none());
        let diagnostics = response.diagnostics();
        assert_eq!(diagnostics.prompt_feedback.as_deref(), Some("SAFETY"));
        assert_eq!(diagnostics.safety_ratings.len(), 1);
        assert!(diagnostics.safety_ratings[0].blocked);
    }

    #[test]
    fn text_parts_are_concatenated() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "```json\n"}, {"text": "{}\n```"}], "role": "model"},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("```json\n{}\n```"));
        assert_eq!(response.diagnostics().finish_reason.as_deref(), Some("STOP"));
    }
}
