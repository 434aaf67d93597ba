//! Core data types for the Aesop story orchestration library.
//!
//! This crate provides the foundation types shared by every other Aesop crate:
//! roles and rosters, the append-only transcript, run parameters, and the
//! request/response pair exchanged with language models.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod request;
mod role;
mod run_config;
mod transcript;

pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerationParams, GenerationParamsBuilder,
    GenerateResponse, Usage,
};
pub use role::{Role, RoleBuilder, Roster};
pub use run_config::{
    DEFAULT_MAX_TURNS, DEFAULT_MIN_ARTIFACT_LENGTH, DEFAULT_MIN_PUNCTUATION_DENSITY,
    DEFAULT_TARGET_WORD_COUNT, DEFAULT_TERMINATION_MARKER, RunConfig, RunConfigBuilder,
};
pub use transcript::{Transcript, Turn};
