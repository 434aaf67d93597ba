//! Multi-role turn orchestration for Aesop.
//!
//! A fixed roster of [`Role`](aesop_core::Role)s takes turns answering a goal.
//! A [`TurnSelector`] picks each speaker, a [`CompletionRule`] decides when
//! the work is done, and an [`Extractor`] recovers the finished artifact from
//! the transcript. [`StoryGenerator`] wires all of it up from an
//! [`AesopConfig`] to write children's stories.
//!
//! # Example
//!
//! ```no_run
//! use aesop_ensemble::{AesopConfig, StoryGenerator};
//! use aesop_interface::AesopDriver;
//! use std::sync::Arc;
//!
//! # async fn demo(driver: Arc<dyn AesopDriver>) -> aesop_error::AesopResult<()> {
//! let generator = StoryGenerator::new(AesopConfig::load()?, driver)?;
//! let outcome = generator.generate("The Brave Little Kite", "Adventure").await?;
//! println!("{}", outcome.render());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod config;
mod extractor;
mod orchestrator;
mod selector;
mod story;

pub use completion::{AnyRule, CompletionRule, MarkerRule, TurnCountRule};
pub use config::{
    AesopConfig, DEFAULT_CONFIG, ModelSettings, Provider, SelectorPolicy, SelectorSettings,
    StorySettings,
};
pub use extractor::{
    ArtifactHeuristic, ChatterFilter, EMPTY_ARTIFACT_SENTINEL, Extractor, ProseHeuristic,
    punctuation_density, strip_marker,
};
pub use orchestrator::Orchestrator;
pub use selector::{
    DEFAULT_SELECTOR_PROMPT, LlmGuidedSelector, RoundRobinSelector, TurnSelector, parse_selection,
};
pub use story::{
    MISSING_TITLE_MESSAGE, NO_STORY_MESSAGE, StoryAnalysis, StoryGenerator, StoryOutcome,
    WORDS_PER_PAGE, error_message, format_output, story_file_name,
};
