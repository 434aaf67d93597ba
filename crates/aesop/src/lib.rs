//! Aesop: a team of LLM roles that writes children's stories together.
//!
//! A fixed roster of roles (by default a character developer, a story writer
//! and a climax creator) take turns on a shared transcript until one of them
//! signals that the story is finished. The finished story is then recovered
//! from the transcript, with coordination chatter filtered out.
//!
//! # Features
//!
//! - **Turn orchestration**: round-robin or LLM-guided speaker selection
//! - **Completion rules**: termination marker or turn cap
//! - **Artifact extraction**: prose heuristics with a composite fallback
//! - **Layered configuration**: bundled defaults, user and project files,
//!   `AESOP__*` environment variables
//! - **Providers**: OpenAI (and compatible servers) and Anthropic
//!
//! # Architecture
//!
//! Aesop is organised as a workspace of focused crates:
//!
//! - `aesop_error` - Error types
//! - `aesop_core` - Roles, transcripts, run configuration, request types
//! - `aesop_interface` - The `AesopDriver` trait and run outcomes
//! - `aesop_models` - Provider clients (feature-gated)
//! - `aesop_ensemble` - Orchestrator, selectors, extractor, story generator
//!
//! This crate (`aesop`) re-exports everything for convenience and ships the
//! `aesop` command-line tool.
//!
//! # Example
//!
//! ```no_run
//! use aesop::{AesopConfig, StoryGenerator, build_driver};
//!
//! # async fn demo() -> aesop::AesopResult<()> {
//! let config = AesopConfig::load()?;
//! let driver = build_driver(config.model(), config.api_key(None)?)?;
//! let generator = StoryGenerator::new(config, driver)?;
//! println!("{}", generator.generate_story("The Magic Garden", "Fantasy").await);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
mod driver;
pub mod telemetry;

pub use driver::build_driver;

// Re-export core crates (always available)
pub use aesop_core::*;
pub use aesop_ensemble::*;
pub use aesop_error::*;
pub use aesop_interface::*;

// Provider clients, per enabled feature
pub use aesop_models::*;
