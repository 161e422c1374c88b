//! Generation command handlers.

use super::print_json;
use homebase::{
    ConfigError, GeminiClient, HomebaseConfig, HomebaseResult, ResponseExtractionPipeline,
    TracingSink,
};
use std::path::Path;
use tracing::{info, instrument};

fn read_system_instruction(path: &Path) -> HomebaseResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!(
            "Failed to read system instruction from {}: {}",
            path.display(),
            e
        ))
        .into()
    })
}

fn pipeline(config: &HomebaseConfig) -> HomebaseResult<ResponseExtractionPipeline<GeminiClient>> {
    ResponseExtractionPipeline::from_config(config, GeminiClient::new, TracingSink)
}

/// Answer a prompt and print the payload.
#[instrument(skip_all, fields(system = %system.display()))]
pub async fn generate_from_prompt(
    config: &HomebaseConfig,
    system: &Path,
    prompt: &str,
) -> HomebaseResult<()> {
    let system_instruction = read_system_instruction(system)?;
    let pipeline = pipeline(config)?;

    let payload = pipeline
        .generate_from_prompt(&system_instruction, prompt)
        .await?;
    info!("Generation succeeded");
    print_json(&payload)
}

/// Answer from a document and print the payload.
#[instrument(skip_all, fields(system = %system.display(), input = %input.display()))]
pub async fn generate_from_file(
    config: &HomebaseConfig,
    system: &Path,
    input: &Path,
) -> HomebaseResult<()> {
    let system_instruction = read_system_instruction(system)?;
    let pipeline = pipeline(config)?;

    let upload = std::fs::File::open(input).map_err(|e| {
        ConfigError::new(format!("Failed to open {}: {}", input.display(), e))
    })?;

    let payload = pipeline
        .generate_from_file(&system_instruction, upload)
        .await?;
    info!("Generation succeeded");
    print_json(&payload)
}
