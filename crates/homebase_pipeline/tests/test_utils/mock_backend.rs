//! Mock generation backend for testing.

use async_trait::async_trait;
use homebase_core::{GenerationRequest, GenerationResponse};
use homebase_error::{GenerationError, GenerationErrorKind};
use homebase_interface::GenerationBackend;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(GenerationErrorKind),
    /// Return a sequence of responses; the last one repeats
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GenerationErrorKind),
}

/// Mock backend that counts calls and records the last request.
///
/// Clones share the call counter, so a test can keep one handle while the
/// pipeline owns another.
#[derive(Debug, Clone)]
pub struct MockBackend {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockBackend {
    /// Create a mock backend with custom behavior.
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Always succeeds with the given text.
    #[allow(dead_code)]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Success(text.into()))
    }

    /// Always fails with the given error.
    #[allow(dead_code)]
    pub fn error(kind: GenerationErrorKind) -> Self {
        Self::new(MockBehavior::Error(kind))
    }

    /// Plays the responses in order.
    #[allow(dead_code)]
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self::new(MockBehavior::Sequence(responses))
    }

    /// Get the number of times generate() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The most recent request, if any.
    #[allow(dead_code)]
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn next_response(&self, req: &GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;
        *self.last_request.lock().unwrap() = Some(req.clone());

        let response = match &self.behavior {
            MockBehavior::Success(text) => MockResponse::Success(text.clone()),
            MockBehavior::Error(kind) => MockResponse::Error(kind.clone()),
            MockBehavior::Sequence(responses) => responses
                .get(current)
                .or_else(|| responses.last())
                .cloned()
                .expect("sequence must not be empty"),
        };

        match response {
            MockResponse::Success(text) => Ok(GenerationResponse::from_text(text)),
            MockResponse::Error(kind) => Err(GenerationError::new(kind)),
        }
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(
        &self,
        req: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.next_response(req)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
