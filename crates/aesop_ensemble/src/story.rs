//! Children's story generation on top of the orchestrator.

use crate::{AesopConfig, LlmGuidedSelector, Orchestrator, SelectorPolicy, TurnSelector};
use aesop_core::{DEFAULT_TARGET_WORD_COUNT, Transcript};
use aesop_error::{
    AesopError, AesopErrorKind, AesopResult, OrchestrationError, OrchestrationErrorKind,
};
use aesop_interface::{AesopDriver, Artifact, RunOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Returned in place of a story when the title is blank.
pub const MISSING_TITLE_MESSAGE: &str = "Please enter a title for your story.";

/// Returned by [`format_output`] for blank input.
pub const NO_STORY_MESSAGE: &str = "No story generated.";

/// Words assumed per printed page.
pub const WORDS_PER_PAGE: usize = 150;

/// User-facing text for a failed generation.
pub fn error_message(error: &AesopError) -> String {
    format!(
        "Sorry, there was an error generating the story: {}\n\nPlease check your API key and internet connection.",
        error.summary()
    )
}

/// Trimmed story, or [`NO_STORY_MESSAGE`] when nothing is left.
pub fn format_output(story: &str) -> String {
    let trimmed = story.trim();
    if trimmed.is_empty() {
        NO_STORY_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Download name for a story: spaces become underscores.
///
/// ```
/// use aesop_ensemble::story_file_name;
///
/// assert_eq!(story_file_name("The Magic Garden"), "The_Magic_Garden_story.txt");
/// ```
pub fn story_file_name(title: &str) -> String {
    format!("{}_story.txt", title.replace(' ', "_"))
}

/// Result of one story request.
#[derive(Debug)]
pub struct StoryOutcome {
    title: String,
    genre: String,
    run: RunOutcome,
}

impl StoryOutcome {
    /// Title the story was generated for.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Genre actually used.
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Underlying run result.
    pub fn run(&self) -> &RunOutcome {
        &self.run
    }

    /// Full transcript of the collaboration.
    pub fn transcript(&self) -> &Transcript {
        self.run.transcript()
    }

    /// Extracted story, when the run completed.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.run.artifact()
    }

    /// True when the run completed with real content.
    pub fn is_told(&self) -> bool {
        self.artifact().is_some_and(|a| !a.is_empty())
    }

    /// String form: story with inline advisory, sentinel, or error text.
    pub fn render(&self) -> String {
        match &self.run {
            RunOutcome::Completed { artifact, .. } => artifact.render(),
            RunOutcome::Failed { error, .. } => error_message(error),
        }
    }

    /// Download name for this story.
    pub fn file_name(&self) -> String {
        story_file_name(&self.title)
    }
}

/// Generates children's stories with a team of roles.
///
/// # Examples
///
/// ```no_run
/// use aesop_ensemble::{AesopConfig, StoryGenerator};
/// use aesop_interface::AesopDriver;
/// use std::sync::Arc;
///
/// # async fn demo(driver: Arc<dyn AesopDriver>) -> aesop_error::AesopResult<()> {
/// let generator = StoryGenerator::new(AesopConfig::load()?, driver)?;
/// let story = generator.generate_story("The Magic Garden Adventure", "Fantasy").await;
/// println!("{story}");
/// # Ok(())
/// # }
/// ```
pub struct StoryGenerator {
    config: AesopConfig,
    driver: Arc<dyn AesopDriver>,
    cancellation: Option<CancellationToken>,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("selector", self.config.selector().policy())
            .finish_non_exhaustive()
    }
}

impl StoryGenerator {
    /// Generator over a validated configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn new(config: AesopConfig, driver: Arc<dyn AesopDriver>) -> AesopResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            driver,
            cancellation: None,
        })
    }

    /// Token checked before every turn of every run.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &AesopConfig {
        &self.config
    }

    /// Blank genres fall back to the default; unknown genres pass with a warning.
    pub fn resolve_genre(&self, genre: &str) -> String {
        let story = self.config.story();
        let genre = genre.trim();
        if genre.is_empty() {
            return story.default_genre().clone();
        }
        if !story.is_known_genre(genre) {
            warn!(genre, "Genre is not in the configured list");
        }
        genre.to_string()
    }

    /// Goal handed to the team.
    pub fn task(&self, title: &str, genre: &str) -> String {
        let story = self.config.story();
        let run = self.config.run();
        let target = (*run.target_word_count()).unwrap_or(DEFAULT_TARGET_WORD_COUNT);
        story
            .task_template()
            .replace("{title}", title)
            .replace("{genre}", genre)
            .replace("{audience}", story.audience())
            .replace("{chapter_count}", &story.chapter_count().to_string())
            .replace("{target_words}", &target.to_string())
            .replace("{marker}", run.termination_marker())
    }

    /// Fresh orchestrator wired from the configuration.
    ///
    /// # Errors
    ///
    /// Fails when the roster or run section is invalid.
    pub fn orchestrator(&self) -> AesopResult<Orchestrator> {
        let params = self.config.model().params()?;
        let selector: Box<dyn TurnSelector> = match self.config.selector().policy() {
            SelectorPolicy::RoundRobin => Box::new(crate::RoundRobinSelector),
            SelectorPolicy::LlmGuided => Box::new(
                LlmGuidedSelector::new(Arc::clone(&self.driver))
                    .with_prompt(self.config.selector().prompt().clone())
                    .with_params(params.clone())
                    .with_repeated_speaker(*self.config.selector().allow_repeated_speaker()),
            ),
        };

        let mut orchestrator = Orchestrator::from_roster(
            self.config.roster()?,
            self.config.run().clone(),
            Arc::clone(&self.driver),
        )?
        .with_selector(selector)
        .with_params(params);

        if let Some(token) = &self.cancellation {
            orchestrator = orchestrator.with_cancellation(token.clone());
        }
        Ok(orchestrator)
    }

    /// Generate a story and report the tagged outcome.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title and configuration errors
    /// raised before the first turn. Failures during the run are reported in
    /// the outcome instead.
    #[instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn generate(&self, title: &str, genre: &str) -> AesopResult<StoryOutcome> {
        let title = title.trim();
        if title.is_empty() {
            return Err(OrchestrationError::new(OrchestrationErrorKind::InvalidInput(
                MISSING_TITLE_MESSAGE.to_string(),
            ))
            .into());
        }
        let genre = self.resolve_genre(genre);
        let task = self.task(title, &genre);

        info!(title, genre = %genre, "Generating story");
        let run = self.orchestrator()?.run(&task).await?;

        Ok(StoryOutcome {
            title: title.to_string(),
            genre,
            run,
        })
    }

    /// Generate a story and encode the outcome as text.
    ///
    /// Never fails: errors come back as human-readable messages.
    pub async fn generate_story(&self, title: &str, genre: &str) -> String {
        match self.generate(title, genre).await {
            Ok(outcome) => outcome.render(),
            Err(error) => match error.kind() {
                AesopErrorKind::Orchestration(e) => match &e.kind {
                    OrchestrationErrorKind::InvalidInput(message) => message.clone(),
                    _ => error_message(&error),
                },
                _ => error_message(&error),
            },
        }
    }
}

/// Shape metrics for a generated story.
///
/// ```
/// use aesop_ensemble::StoryAnalysis;
///
/// let analysis = StoryAnalysis::of("Chapter 1\n\n\"Hello,\" said the hero.");
/// assert_eq!(analysis.words, 6);
/// assert!(analysis.has_chapters);
/// assert!(analysis.has_dialogue);
/// assert!(analysis.has_characters);
/// assert!(!analysis.target_met);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryAnalysis {
    /// Whitespace-separated words
    pub words: usize,
    /// Whole pages at [`WORDS_PER_PAGE`]
    pub pages: usize,
    /// Characters, including whitespace
    pub characters: usize,
    /// Word count reached the target
    pub target_met: bool,
    /// Mentions a chapter
    pub has_chapters: bool,
    /// Contains quotation marks
    pub has_dialogue: bool,
    /// Mentions names, characters, heroes or friends
    pub has_characters: bool,
}

impl StoryAnalysis {
    /// Analyse against the default word target.
    pub fn of(text: &str) -> Self {
        Self::with_target(text, DEFAULT_TARGET_WORD_COUNT)
    }

    /// Analyse against a given word target.
    pub fn with_target(text: &str, target: usize) -> Self {
        let words = text.split_whitespace().count();
        let lowered = text.to_lowercase();
        Self {
            words,
            pages: words / WORDS_PER_PAGE,
            characters: text.chars().count(),
            target_met: words >= target,
            has_chapters: lowered.contains("chapter"),
            has_dialogue: text.contains('"') || text.contains('\''),
            has_characters: ["name", "character", "hero", "friend"]
                .iter()
                .any(|w| lowered.contains(w)),
        }
    }
}

impl std::fmt::Display for StoryAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |b: bool| if b { "yes" } else { "no" };
        writeln!(f, "Word count:      {}", self.words)?;
        writeln!(f, "Estimated pages: {}", self.pages)?;
        writeln!(f, "Target met:      {}", mark(self.target_met))?;
        writeln!(f, "Characters:      {}", self.characters)?;
        writeln!(f, "Has chapters:    {}", mark(self.has_chapters))?;
        writeln!(f, "Has dialogue:    {}", mark(self.has_dialogue))?;
        write!(f, "Has characters:  {}", mark(self.has_characters))
    }
}
