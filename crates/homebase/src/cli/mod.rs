//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the homebase binary.

mod commands;
mod generate;
mod google;

pub use commands::{Cli, Commands};
pub use generate::{generate_from_file, generate_from_prompt};
pub use google::{download_drive_file, lookup_place};

use homebase::{HomebaseResult, JsonError};

/// Print a value as pretty JSON on stdout.
pub fn print_json(value: &impl serde::Serialize) -> HomebaseResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
