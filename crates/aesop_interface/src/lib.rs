//! Trait definitions for the Aesop story orchestration library.
//!
//! This crate defines the seam between orchestration and model providers
//! ([`AesopDriver`]) and the types a run hands back to its caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod outcome;
mod traits;

pub use artifact::{Advisory, Artifact, ArtifactSource};
pub use outcome::{CompletionReason, RunOutcome, RunState};
pub use traits::AesopDriver;
