//! Google Gemini `generateContent` client.
//!
//! One request per [`GenerationBackend::generate`] call. Retries are the
//! pipeline's job; this client only classifies what went wrong:
//!
//! - HTTP 408/504, status `DEADLINE_EXCEEDED` or a client timeout → deadline
//! - HTTP 429 or status `RESOURCE_EXHAUSTED` → quota
//! - a reply with no text → content blocked, with diagnostics attached
//! - an undecodable body → malformed response

use super::dto::{ApiErrorEnvelope, GeminiRequest, GeminiResponse};
use async_trait::async_trait;
use homebase_config::{ApiKey, GeminiSettings, HomebaseConfig};
use homebase_core::{GenerationRequest, GenerationResponse};
use homebase_error::{GenerationError, GenerationErrorKind, HomebaseResult, HttpError};
use homebase_interface::GenerationBackend;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client from an already-resolved key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(name = "gemini_client_new", skip(api_key, settings), fields(model = %settings.model))]
    pub fn new(api_key: ApiKey, settings: &GeminiSettings) -> HomebaseResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );
        debug!(endpoint = %endpoint, "Creating Gemini client");

        Ok(Self {
            client,
            api_key,
            model: settings.model.clone(),
            endpoint,
        })
    }

    /// Resolves the key from configuration, then creates the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is missing.
    pub fn from_config(config: &HomebaseConfig) -> HomebaseResult<Self> {
        let api_key = config.gemini.api_key()?;
        Self::new(api_key, &config.gemini)
    }

    fn transport_error(e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            warn!(error = %e, "Gemini request timed out");
            GenerationError::new(GenerationErrorKind::DeadlineExceeded(e.to_string()))
        } else {
            error!(error = %e, "Failed to send request to Gemini API");
            GenerationError::new(GenerationErrorKind::Transport(e.to_string()))
        }
    }

    /// Classifies a non-success status using the code and the error body.
    fn status_error(status_code: u16, body: &str) -> GenerationError {
        let (status, message) = match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.status, envelope.error.message),
            Err(_) => (None, body.to_string()),
        };

        let kind = match (status_code, status.as_deref()) {
            (408 | 504, _) | (_, Some("DEADLINE_EXCEEDED")) => {
                GenerationErrorKind::DeadlineExceeded(message)
            }
            (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => {
                GenerationErrorKind::ResourceExhausted(message)
            }
            _ => GenerationErrorKind::Http {
                status_code,
                message,
            },
        };
        GenerationError::new(kind)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    #[instrument(
        skip(self, req),
        fields(model = %self.model, parts = req.parts().len(), prompt_bytes = req.prompt_len())
    )]
    async fn generate(
        &self,
        req: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&GeminiRequest::from(req))
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::transport_error)?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API returned error");
            return Err(Self::status_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let diagnostics = parsed.diagnostics();
        match parsed.text() {
            Some(text) => {
                debug!(chars = text.len(), finish_reason = ?diagnostics.finish_reason, "Received Gemini response");
                Ok(GenerationResponse { text, diagnostics })
            }
            None => {
                warn!(diagnostics = %diagnostics, "Gemini response carried no text");
                Err(GenerationError::new(GenerationErrorKind::ContentBlocked(
                    diagnostics,
                )))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let quota = r#"{"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            GeminiClient::status_error(429, quota).kind,
            GenerationErrorKind::ResourceExhausted(ref m) if m == "quota"
        ));

        let deadline = r#"{"error": {"code": 500, "message": "slow", "status": "DEADLINE_EXCEEDED"}}"#;
        assert!(matches!(
            GeminiClient::status_error(500, deadline).kind,
            GenerationErrorKind::DeadlineExceeded(_)
        ));

        assert!(matches!(
            GeminiClient::status_error(504, "gateway timeout").kind,
            GenerationErrorKind::DeadlineExceeded(ref m) if m == "gateway timeout"
        ));

        assert!(matches!(
            GeminiClient::status_error(400, "bad").kind,
            GenerationErrorKind::Http { status_code: 400, .. }
        ));
    }
}
