//! Tests for loading configuration files.

use homebase_config::HomebaseConfig;
use homebase_core::{SafetyThreshold, UnclassifiedPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn partial_file_keeps_defaults_for_missing_values() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[gemini]
model = "gemini-1.5-flash"
safety_threshold = "BLOCK_ONLY_HIGH"

[retry]
max_attempts = 4
unclassified = "abort"
"#,
    )?;

    let config = HomebaseConfig::from_file(file.path())?;

    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(config.gemini.safety_threshold, SafetyThreshold::BlockOnlyHigh);
    assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.retry.max_attempts, 4);
    assert_eq!(config.retry.unclassified, UnclassifiedPolicy::Abort);
    assert_eq!(config.retry.long_delay_ms, 10_000);
    assert_eq!(config.places.units, "imperial");
    Ok(())
}

#[test]
fn invalid_values_are_config_errors() -> anyhow::Result<()> {
    let file = write_config("[retry]\nmax_attempts = 0\n")?;

    let err = HomebaseConfig::from_file(file.path()).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("max_attempts"));
    Ok(())
}

#[test]
fn temperature_out_of_range_is_rejected() {
    let err = HomebaseConfig::from_toml_str("[gemini]\ntemperature = 3.0\n").unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("temperature"));
}

#[test]
fn missing_file_is_config_error() {
    let err = HomebaseConfig::from_file("/nonexistent/homebase.toml").unwrap_err();
    assert!(err.is_config());
}

#[test]
fn literal_key_wins_over_environment() -> anyhow::Result<()> {
    let config = HomebaseConfig::from_toml_str(
        "[gemini]\napi_key = \"from-file\"\napi_key_env = \"HOMEBASE_TEST_NEVER_SET_KEY\"\n",
    )?;
    assert_eq!(config.gemini.api_key()?.expose(), "from-file");
    Ok(())
}

#[test]
fn missing_key_names_the_variable() -> anyhow::Result<()> {
    let config =
        HomebaseConfig::from_toml_str("[places]\napi_key_env = \"HOMEBASE_TEST_NEVER_SET_KEY\"\n")?;
    let err = config.places.api_key().unwrap_err();
    assert_eq!(
        err.message,
        "API key not found in environment variable 'HOMEBASE_TEST_NEVER_SET_KEY'"
    );
    Ok(())
}
