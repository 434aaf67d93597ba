//! CLI command definitions.

use aesop_ensemble::{Provider, SelectorPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Aesop - a team of LLM roles writing children's stories together
#[derive(Parser, Debug)]
#[command(name = "aesop")]
#[command(about = "A team of LLM roles writing children's stories together", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true, env = "AESOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story
    Generate(GenerateArgs),

    /// List the configured genres
    Genres,

    /// List the configured roles
    Roles,
}

/// Options for `aesop generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Story title
    #[arg(short, long)]
    pub title: String,

    /// Story genre (defaults to the configured genre)
    #[arg(short, long, default_value = "")]
    pub genre: String,

    /// Turn selection policy
    #[arg(long)]
    pub selector: Option<SelectorArg>,

    /// Maximum number of turns
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Time budget for the whole run, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// LLM provider
    #[arg(long)]
    pub provider: Option<ProviderArg>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Alternative server root for the provider
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key (defaults to the provider's environment variable)
    #[arg(long, hide_env_values = true, env = "AESOP_API_KEY")]
    pub api_key: Option<String>,

    /// Write the story to this file
    #[arg(short, long, conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write the story to `<Title>_story.txt` in the current directory
    #[arg(long)]
    pub save: bool,

    /// Print word count and structure checks after the story
    #[arg(long)]
    pub analyze: bool,

    /// Print every turn before the story
    #[arg(long)]
    pub transcript: bool,
}

/// Turn selection policy on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectorArg {
    /// Declaration-order rotation
    RoundRobin,
    /// Model picks the next speaker
    LlmGuided,
}

impl From<SelectorArg> for SelectorPolicy {
    fn from(arg: SelectorArg) -> Self {
        match arg {
            SelectorArg::RoundRobin => SelectorPolicy::RoundRobin,
            SelectorArg::LlmGuided => SelectorPolicy::LlmGuided,
        }
    }
}

/// Provider on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// OpenAI or a compatible server
    Openai,
    /// Anthropic
    Anthropic,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Provider::OpenAI,
            ProviderArg::Anthropic => Provider::Anthropic,
        }
    }
}
