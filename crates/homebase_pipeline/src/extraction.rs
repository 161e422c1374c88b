//! Pulling a JSON payload out of free-form model text.
//!
//! Replies are expected to carry the payload in a fenced block:
//!
//! ````text
//! Here are your places:
//! ```json
//! [{"name": "Laurelhurst Park"}]
//! ```
//! ````
//!
//! The first ```` ```json ```` block wins. Its content is parsed as-is, and
//! only if that fails is it un-escaped (`\\` → `\`, `\"` → `"`) and parsed
//! again, so valid payloads with literal backslashes survive.

use homebase_core::ExtractedPayload;
use homebase_error::{ExtractionError, ExtractionErrorKind};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\r?\n([\s\S]*?)\r?\n```").expect("Valid fence regex"));

const OPENING_MARKER: &str = "```json";
const CLOSING_MARKER: &str = "```";

/// Extract the fenced JSON payload, or `None` if there is no usable one.
///
/// # Examples
///
/// ```
/// use homebase_pipeline::extract_json;
/// use serde_json::json;
///
/// assert_eq!(extract_json("```json\n{\"a\":1}\n```"), Some(json!({"a": 1})));
/// assert_eq!(extract_json("no fences here"), None);
/// assert_eq!(extract_json("```json\n{\"a\":\n```"), None);
/// ```
pub fn extract_json(text: &str) -> Option<ExtractedPayload> {
    try_extract_json(text).ok()
}

/// Extract the fenced JSON payload, reporting why when there is none.
///
/// # Errors
///
/// - [`ExtractionErrorKind::NoFencedBlock`] when neither a fenced block nor
///   a leading ```` ```json ```` / trailing ```` ``` ```` marker is present
/// - [`ExtractionErrorKind::InvalidJson`] when the content does not parse,
///   even after un-escaping
/// - [`ExtractionErrorKind::NotStructured`] when it parses to a scalar
pub fn try_extract_json(text: &str) -> Result<ExtractedPayload, ExtractionError> {
    let content = match fenced_block(text) {
        Some(block) => block,
        None => strip_markers(text)
            .ok_or_else(|| ExtractionError::new(ExtractionErrorKind::NoFencedBlock))?,
    };

    match parse_lenient(content)? {
        value @ (Value::Object(_) | Value::Array(_)) => Ok(value),
        other => Err(ExtractionError::new(ExtractionErrorKind::NotStructured(
            value_kind(&other).to_string(),
        ))),
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    FENCED_JSON
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Handles fences without inner line breaks, e.g. ```` ```json{"a":1}``` ````.
fn strip_markers(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if !trimmed.starts_with(OPENING_MARKER) && !trimmed.ends_with(CLOSING_MARKER) {
        return None;
    }

    let inner = trimmed.strip_prefix(OPENING_MARKER).unwrap_or(trimmed);
    let inner = inner.strip_suffix(CLOSING_MARKER).unwrap_or(inner);
    Some(inner.trim())
}

fn parse_lenient(content: &str) -> Result<Value, ExtractionError> {
    let first_error = match serde_json::from_str(content) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let unescaped = content.replace("\\\\", "\\").replace("\\\"", "\"");
    if unescaped == content {
        return Err(invalid_json(first_error));
    }

    debug!("Fenced content did not parse as-is, retrying after un-escaping");
    serde_json::from_str(&unescaped).map_err(invalid_json)
}

fn invalid_json(e: serde_json::Error) -> ExtractionError {
    ExtractionError::new(ExtractionErrorKind::InvalidJson(e.to_string()))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_block() {
        let text = "Sure!\n```json\n{\"a\":1}\n```\nAnything else?";
        assert_eq!(extract_json(text), Some(json!({"a": 1})));
    }

    #[test]
    fn first_block_wins() {
        let text = "```json\n[1]\n```\nand\n```json\n[2]\n```";
        assert_eq!(extract_json(text), Some(json!([1])));
    }

    #[test]
    fn crlf_line_breaks() {
        assert_eq!(extract_json("```json\r\n[true]\r\n```"), Some(json!([true])));
    }

    #[test]
    fn no_markers_is_none_not_error() {
        let err = try_extract_json("{\"a\": 1}").unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::NoFencedBlock);
        assert_eq!(extract_json("just prose"), None);
    }

    #[test]
    fn invalid_fenced_content() {
        let err = try_extract_json("```json\n{\"a\": }\n```").unwrap_err();
        assert!(matches!(err.kind, ExtractionErrorKind::InvalidJson(_)));
    }

    #[test]
    fn literal_backslashes_survive() {
        // valid as-is; un-escaping first would turn \\n into \n inside the string
        let text = "```json\n{\"path\": \"C:\\\\new\"}\n```";
        assert_eq!(extract_json(text), Some(json!({"path": "C:\\new"})));
    }

    #[test]
    fn double_encoded_content_is_unescaped() {
        let text = "```json\n{\\\"city\\\": \\\"Austin\\\"}\n```";
        assert_eq!(extract_json(text), Some(json!({"city": "Austin"})));
    }

    #[test]
    fn single_line_fence_falls_back_to_marker_strip() {
        assert_eq!(extract_json("  ```json{\"a\":[1,2]}```  "), Some(json!({"a": [1, 2]})));
        assert_eq!(extract_json("[3]\n```"), Some(json!([3])));
    }

    #[test]
    fn scalars_are_not_payloads() {
        let err = try_extract_json("```json\n42\n```").unwrap_err();
        assert_eq!(err.kind, ExtractionErrorKind::NotStructured("a number".to_string()));
    }
}
