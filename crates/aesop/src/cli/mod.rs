//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the aesop binary.

mod commands;
mod generate;
mod listing;

pub use commands::{Cli, Commands, GenerateArgs, ProviderArg, SelectorArg};
pub use generate::{apply_overrides, load_config, run_generate, tell_story};
pub use listing::{list_genres, list_roles};
