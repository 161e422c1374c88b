//! Structured diagnostic events and the stock sinks.

use crate::DiagnosticSink;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::Level;

/// One structured diagnostic emitted by the pipeline.
///
/// # Examples
///
/// ```
/// use homebase_interface::DiagnosticEvent;
/// use tracing::Level;
///
/// let event = DiagnosticEvent::new(Level::WARN, "attempt failed")
///     .with_field("attempt", 1)
///     .with_field("failure_kind", "deadline_exceeded");
///
/// assert_eq!(event.field("attempt"), Some(&serde_json::json!(1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEvent {
    /// Severity
    pub level: Level,
    /// Human-readable summary
    pub message: String,
    /// Structured fields, ordered by key
    pub fields: BTreeMap<String, Value>,
}

impl DiagnosticEvent {
    /// Create an event with no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Attach a field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn fields_json(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_default()
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        let fields = event.fields_json();
        // tracing macros need a const level
        match event.level {
            Level::ERROR => tracing::error!(fields = %fields, "{}", event.message),
            Level::WARN => tracing::warn!(fields = %fields, "{}", event.message),
            Level::INFO => tracing::info!(fields = %fields, "{}", event.message),
            Level::DEBUG => tracing::debug!(fields = %fields, "{}", event.message),
            _ => tracing::trace!(fields = %fields, "{}", event.message),
        }
    }
}

/// Keeps events in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Events whose message contains `needle`.
    pub fn matching(&self, needle: &str) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.message.contains(needle))
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<T> {
    fn record(&self, event: DiagnosticEvent) {
        (**self).record(event)
    }
}
