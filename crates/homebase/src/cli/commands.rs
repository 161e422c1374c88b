//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Homebase - place recommendations from Gemini, enriched with Google Places
#[derive(Parser, Debug)]
#[command(name = "homebase")]
#[command(about = "Place recommendations from Gemini, enriched with Google Places", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true, env = "HOMEBASE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a free-form prompt and print the extracted JSON
    Generate {
        /// File holding the system instruction
        #[arg(long)]
        system: PathBuf,

        /// Prompt text
        #[arg(long)]
        prompt: String,
    },

    /// Answer from an uploaded document and print the extracted JSON
    GenerateFile {
        /// File holding the system instruction
        #[arg(long)]
        system: PathBuf,

        /// Document to send
        #[arg(long)]
        input: PathBuf,
    },

    /// Look up a place and its commute from home
    Place {
        /// Street address of the place
        #[arg(long)]
        address: String,

        /// Name of the place
        #[arg(long)]
        name: String,

        /// Home address to measure the commute from
        #[arg(long)]
        home: String,
    },

    /// Download a file from Google Drive
    Drive {
        /// Drive file id
        #[arg(long)]
        file_id: String,

        /// Environment variable holding the OAuth access token
        #[arg(long, default_value = "GOOGLE_OAUTH_TOKEN")]
        token_env: String,

        /// Write the file here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_place_with_global_flags() {
        let cli = Cli::try_parse_from([
            "homebase",
            "place",
            "--address",
            "1005 W Burnside St",
            "--name",
            "Powell's Books",
            "--home",
            "1 Home St",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Place { ref name, .. } if name == "Powell's Books"));
    }

    #[test]
    fn drive_token_env_has_default() {
        let cli = Cli::try_parse_from(["homebase", "drive", "--file-id", "abc"]).unwrap();
        match cli.command {
            Commands::Drive { token_env, .. } => assert_eq!(token_env, "GOOGLE_OAUTH_TOKEN"),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
