//! Tests for generation request construction.

use homebase_core::{
    FILE_PREAMBLE, GenerationConfig, GenerationRequest, PromptPart, SEARCH_PREAMBLE,
    SafetyThreshold,
};

#[test]
fn test_builder_defaults_config() -> anyhow::Result<()> {
    let request = GenerationRequest::builder()
        .system_instruction("Return JSON")
        .parts(vec![PromptPart::from("hello")])
        .build()?;

    assert_eq!(request.config(), &GenerationConfig::default());
    assert_eq!(*request.config().temperature(), 1.0);
    assert_eq!(*request.config().top_p(), 0.95);
    assert_eq!(*request.config().safety_threshold(), SafetyThreshold::BlockNone);
    Ok(())
}

#[test]
fn test_builder_rejects_empty_parts() {
    let result = GenerationRequest::builder()
        .system_instruction("Return JSON")
        .parts(Vec::<PromptPart>::new())
        .build();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("at least one prompt part"));
}

#[test]
fn test_builder_requires_system_instruction() {
    let result = GenerationRequest::builder()
        .parts(vec![PromptPart::from("hello")])
        .build();
    assert!(result.is_err());
}

#[test]
fn test_deserialize_rejects_out_of_range_config() {
    let result = serde_json::from_str::<GenerationConfig>(
        r#"{"temperature":7.5,"top_p":0.9,"top_k":0,"safety_threshold":"BLOCK_NONE","harm_category":"HARM_CATEGORY_DANGEROUS_CONTENT"}"#,
    );
    assert!(result.unwrap_err().to_string().contains("temperature"));

    let result = serde_json::from_str::<GenerationConfig>(
        r#"{"temperature":1.0,"top_p":3.0,"top_k":0,"safety_threshold":"BLOCK_NONE","harm_category":"HARM_CATEGORY_DANGEROUS_CONTENT"}"#,
    );
    assert!(result.unwrap_err().to_string().contains("top_p"));
}

#[test]
fn test_deserialize_rejects_empty_parts() {
    let result = serde_json::from_str::<GenerationRequest>(
        r#"{"system_instruction":"s","parts":[],"config":{"temperature":1.0,"top_p":0.95,"top_k":0,"safety_threshold":"BLOCK_NONE","harm_category":"HARM_CATEGORY_DANGEROUS_CONTENT"}}"#,
    );
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("at least one prompt part")
    );
}

#[test]
fn test_deserialize_rejects_request_with_invalid_config() {
    let result = serde_json::from_str::<GenerationRequest>(
        r#"{"system_instruction":"s","parts":[{"type":"Text","data":"hi"}],"config":{"temperature":7.5,"top_p":3.0,"top_k":0,"safety_threshold":"BLOCK_NONE","harm_category":"HARM_CATEGORY_DANGEROUS_CONTENT"}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_serialized_request_deserializes() -> anyhow::Result<()> {
    let request = GenerationRequest::for_prompt("system", "parks", GenerationConfig::default());
    let json = serde_json::to_string(&request)?;
    let parsed: GenerationRequest = serde_json::from_str(&json)?;
    assert_eq!(parsed, request);
    Ok(())
}

#[test]
fn test_for_prompt_prepends_search_preamble() {
    let request = GenerationRequest::for_prompt(
        "system",
        "coffee near Main St",
        GenerationConfig::default(),
    );

    assert_eq!(request.parts()[0].as_text(), Some(SEARCH_PREAMBLE));
    assert_eq!(request.parts()[1].as_text(), Some("coffee near Main St"));
    assert_eq!(request.system_instruction(), "system");
}

#[test]
fn test_for_file_content_prepends_file_preamble() {
    let request =
        GenerationRequest::for_file_content("system", "line one", GenerationConfig::default());

    assert_eq!(request.parts()[0].as_text(), Some(FILE_PREAMBLE));
    assert_eq!(
        request.prompt_len(),
        FILE_PREAMBLE.len() + "line one".len()
    );
}

#[test]
fn test_safety_threshold_wire_names() {
    let json = serde_json::to_string(&SafetyThreshold::BlockMediumAndAbove).unwrap();
    assert_eq!(json, "\"BLOCK_MEDIUM_AND_ABOVE\"");
    assert_eq!(SafetyThreshold::BlockLowAndAbove.to_string(), "BLOCK_LOW_AND_ABOVE");
}
