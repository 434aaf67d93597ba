//! Aesop CLI binary.
//!
//! This binary provides command-line access to Aesop's functionality:
//! - Generate a story with a team of roles
//! - List configured genres
//! - List the configured roster

use aesop::cli::{Cli, Commands, list_genres, list_roles, load_config, run_generate};
use aesop::telemetry::init_console_telemetry;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Pick up API keys from .env
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    init_console_telemetry(cli.verbose)?;

    let config_path = cli.config.as_deref();

    // Execute the requested command
    match cli.command {
        Commands::Generate(args) => match run_generate(config_path, &args).await {
            Ok(code) => Ok(code),
            Err(e) => {
                eprintln!("Error: {e:#}");
                Ok(ExitCode::FAILURE)
            }
        },

        Commands::Genres => {
            let config = load_config(config_path)?;
            list_genres(&config, &mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Roles => {
            let config = load_config(config_path)?;
            list_roles(&config, &mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
