//! The turn loop.

use crate::{AnyRule, CompletionRule, Extractor, RoundRobinSelector, TurnSelector};
use aesop_core::{GenerationParams, Role, RunConfig, Roster, Transcript};
use aesop_error::{AesopError, AesopResult, OrchestrationError, OrchestrationErrorKind};
use aesop_interface::{AesopDriver, CompletionReason, RunOutcome, RunState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Drives one collaborative run from goal to artifact.
///
/// An orchestrator owns its roster, config snapshot and collaborators. It is
/// single-use: [`run`](Self::run) moves it from `Idle` to a terminal state,
/// and a second call is rejected. Independent runs need independent
/// orchestrators and share nothing but the driver.
///
/// # Examples
///
/// ```no_run
/// use aesop_core::{Role, RunConfig};
/// use aesop_ensemble::Orchestrator;
/// use aesop_interface::AesopDriver;
/// use std::sync::Arc;
///
/// # async fn demo(driver: Arc<dyn AesopDriver>) -> aesop_error::AesopResult<()> {
/// let roles = vec![
///     Role::new("Writer", "Writes drafts", "Write the story."),
///     Role::new("Editor", "Polishes drafts", "Polish the story."),
/// ];
/// let mut orchestrator = Orchestrator::new(roles, RunConfig::default(), driver)?;
/// let outcome = orchestrator.run("A fable about patience").await?;
/// if let Some(artifact) = outcome.artifact() {
///     println!("{}", artifact.render());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
    roster: Roster,
    config: RunConfig,
    driver: Arc<dyn AesopDriver>,
    params: GenerationParams,
    selector: Box<dyn TurnSelector>,
    completion: Box<dyn CompletionRule>,
    extractor: Extractor,
    cancellation: Option<CancellationToken>,
    state: RunState,
}

impl Orchestrator {
    /// Orchestrator with round-robin selection and marker-or-cap completion.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error for an empty or duplicated roster or
    /// an invalid run config. No turn is attempted.
    #[instrument(skip_all, fields(roles = roles.len()))]
    pub fn new(
        roles: Vec<Role>,
        config: RunConfig,
        driver: Arc<dyn AesopDriver>,
    ) -> AesopResult<Self> {
        let roster = Roster::new(roles)?;
        Self::from_roster(roster, config, driver)
    }

    /// Orchestrator over an already validated roster.
    ///
    /// # Errors
    ///
    /// Fails when `config` does not validate.
    pub fn from_roster(
        roster: Roster,
        config: RunConfig,
        driver: Arc<dyn AesopDriver>,
    ) -> AesopResult<Self> {
        config.validate()?;
        debug!(
            roles = roster.len(),
            max_turns = config.max_turns(),
            provider = driver.provider_name(),
            "Orchestrator ready"
        );
        Ok(Self {
            roster,
            config,
            driver,
            params: GenerationParams::default(),
            selector: Box::new(RoundRobinSelector),
            completion: Box::new(AnyRule::default()),
            extractor: Extractor::default(),
            cancellation: None,
            state: RunState::Idle,
        })
    }

    /// Replace the turn selection policy.
    pub fn with_selector(mut self, selector: Box<dyn TurnSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Replace the completion rule.
    pub fn with_completion(mut self, completion: Box<dyn CompletionRule>) -> Self {
        self.completion = completion;
        self
    }

    /// Replace the extractor.
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Model settings passed on every role turn.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Token checked before each turn; firing it also abandons an in-flight model call.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Participating roles.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Run parameters.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Execute the run.
    ///
    /// Transport failures, timeouts and cancellation are reported as
    /// [`RunOutcome::Failed`] carrying the turns produced so far. Reaching
    /// the turn cap without a marker still completes and extracts.
    ///
    /// # Errors
    ///
    /// Returns `NotIdle` when the orchestrator has already run.
    #[instrument(
        skip_all,
        fields(
            roles = self.roster.len(),
            max_turns = self.config.max_turns(),
            selector = self.selector.name()
        )
    )]
    pub async fn run(&mut self, goal: &str) -> AesopResult<RunOutcome> {
        if self.state != RunState::Idle {
            return Err(OrchestrationError::new(OrchestrationErrorKind::NotIdle(
                self.state.to_string(),
            ))
            .into());
        }
        self.state = RunState::Running;
        info!("Run started");

        let mut transcript = Transcript::new(*self.config.max_turns());
        let result = match self.config.timeout() {
            Some(limit) => {
                match tokio::time::timeout(limit, self.turn_loop(goal, &mut transcript)).await {
                    Ok(result) => result,
                    Err(_) => Err(OrchestrationError::new(OrchestrationErrorKind::Timeout(
                        limit.as_secs(),
                    ))
                    .into()),
                }
            }
            None => self.turn_loop(goal, &mut transcript).await,
        };

        match result {
            Ok(reason) => {
                self.state = RunState::Completed;
                let artifact = self.extractor.extract(&transcript, &self.config);
                info!(
                    turns = transcript.len(),
                    reason = %reason,
                    source = ?artifact.source(),
                    "Run completed"
                );
                Ok(RunOutcome::Completed {
                    artifact,
                    transcript,
                    reason,
                })
            }
            Err(error) => {
                self.state = RunState::Failed;
                warn!(
                    turns = transcript.len(),
                    category = %error.category(),
                    error = %error,
                    "Run failed"
                );
                Ok(RunOutcome::Failed { error, transcript })
            }
        }
    }

    async fn turn_loop(
        &self,
        goal: &str,
        transcript: &mut Transcript,
    ) -> AesopResult<CompletionReason> {
        loop {
            let turns = transcript.len();
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                return Err(cancelled(turns));
            }

            let last = transcript
                .last_speaker()
                .and_then(|name| self.roster.find(name));
            let role = self
                .or_cancelled(turns, self.selector.select_next(transcript, &self.roster, last))
                .await?;

            let context = self.turn_context(goal, transcript, role);
            let text = self
                .or_cancelled(
                    turns,
                    self.driver
                        .complete(role.instructions(), &context, &self.params),
                )
                .await?;
            let turn = transcript.append(role.name().as_str(), text)?;
            debug!(
                turn = turn.index(),
                role = %role.name(),
                chars = turn.text().len(),
                "Turn recorded"
            );

            if let Some(reason) = self.completion.evaluate(transcript, &self.config) {
                return Ok(reason);
            }
            if transcript.is_full() {
                return Ok(CompletionReason::TurnCap);
            }
        }
    }

    /// Drive `work` unless the cancellation token fires first.
    async fn or_cancelled<T>(
        &self,
        turns: usize,
        work: impl Future<Output = AesopResult<T>>,
    ) -> AesopResult<T> {
        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(cancelled(turns)),
                result = work => result,
            },
            None => work.await,
        }
    }

    /// Prompt sent to the speaking role: goal, history, and a closing cue.
    pub fn turn_context(&self, goal: &str, transcript: &Transcript, role: &Role) -> String {
        let history = if transcript.is_empty() {
            "(no turns yet)".to_string()
        } else {
            transcript.render()
        };
        format!(
            "{goal}\n\nConversation so far:\n{history}\n\nYou are {name}. Continue the work in your role. When the complete result is ready, end your reply with {marker}.",
            goal = goal.trim(),
            name = role.name(),
            marker = self.config.termination_marker(),
        )
    }
}

fn cancelled(turns: usize) -> AesopError {
    OrchestrationError::new(OrchestrationErrorKind::Cancelled(turns)).into()
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("roster", &self.roster.names())
            .field("config", &self.config)
            .field("selector", &self.selector.name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
