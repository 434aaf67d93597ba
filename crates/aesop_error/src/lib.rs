//! Error types for the Aesop library.
//!
//! This crate provides the foundation error types used throughout the Aesop workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use aesop_error::{AesopResult, ConfigError};
//!
//! fn load() -> AesopResult<String> {
//!     Err(ConfigError::new("aesop.toml not found"))?
//! }
//!
//! match load() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod models;
mod orchestration;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{AesopError, AesopErrorKind, AesopResult};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use orchestration::{ErrorCategory, OrchestrationError, OrchestrationErrorKind};
