//! Homebase CLI binary.
//!
//! This binary provides command-line access to Homebase's functionality:
//! - Generate place recommendations from a prompt or a document
//! - Look up a place's map link, photo and commute
//! - Download a profile document from Google Drive

use clap::Parser;
use homebase::{HomebaseConfig, init_tracing};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, download_drive_file, generate_from_file, generate_from_prompt,
        lookup_place,
    };

    // Load API keys from .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs)?;

    let config = match &cli.config {
        Some(path) => HomebaseConfig::from_file(path)?,
        None => HomebaseConfig::load()?,
    };

    match cli.command {
        Commands::Generate { system, prompt } => {
            generate_from_prompt(&config, &system, &prompt).await?;
        }

        Commands::GenerateFile { system, input } => {
            generate_from_file(&config, &system, &input).await?;
        }

        Commands::Place {
            address,
            name,
            home,
        } => {
            lookup_place(&config, &address, &name, &home).await?;
        }

        Commands::Drive {
            file_id,
            token_env,
            output,
        } => {
            download_drive_file(&config, &file_id, &token_env, output.as_deref()).await?;
        }
    }

    Ok(())
}
