//! Drive and Places command handlers.

use super::print_json;
use homebase::{ConfigError, DriveClient, HomebaseConfig, HomebaseResult, PlacesClient};
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Look up a place and print its record.
#[instrument(skip(config, home))]
pub async fn lookup_place(
    config: &HomebaseConfig,
    address: &str,
    name: &str,
    home: &str,
) -> HomebaseResult<()> {
    let client = PlacesClient::from_config(config)?;
    let info = client.lookup(address, name, home).await;
    print_json(&info)
}

/// Download a Drive file to `output`, or to stdout.
#[instrument(skip(config, output))]
pub async fn download_drive_file(
    config: &HomebaseConfig,
    file_id: &str,
    token_env: &str,
    output: Option<&Path>,
) -> HomebaseResult<()> {
    let token = match std::env::var(token_env) {
        Ok(token) if !token.trim().is_empty() => token,
        _ => return Err(ConfigError::missing_credential(token_env).into()),
    };

    let client = DriveClient::new(token, &config.drive);
    let content = client.download_file(file_id).await?;

    let written = match output {
        Some(path) => std::fs::write(path, &content),
        None => std::io::stdout().lock().write_all(&content),
    };
    written.map_err(|e| ConfigError::new(format!("Failed to write download: {}", e)))?;

    info!(bytes = content.len(), "Saved Drive file");
    Ok(())
}
