//! Turn selection policies.
//!
//! A [`TurnSelector`] decides which role speaks next. The default,
//! [`RoundRobinSelector`], walks the roster in declaration order and never
//! looks at the transcript. [`LlmGuidedSelector`] asks the model instead and
//! falls back to round-robin whenever the reply names no known role.

use aesop_core::{GenerateRequest, GenerationParams, Role, Roster, Transcript};
use aesop_error::{AesopResult, OrchestrationError, OrchestrationErrorKind};
use aesop_interface::AesopDriver;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Prompt used by [`LlmGuidedSelector`] when none is configured.
pub const DEFAULT_SELECTOR_PROMPT: &str = "You are coordinating a team of roles.

{roles}

Current conversation context:
{history}

Select the role from {participants} that should act next. Reply with the role name only.";

/// Chooses the next speaker.
#[async_trait]
pub trait TurnSelector: Send + Sync {
    /// Pick the role that takes the next turn.
    ///
    /// `last` is the role that produced the most recent turn, if any.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when the roster cannot yield a role,
    /// and propagates transport errors from policies that call a model.
    async fn select_next<'r>(
        &self,
        transcript: &Transcript,
        roster: &'r Roster,
        last: Option<&'r Role>,
    ) -> AesopResult<&'r Role>;

    /// Policy name for logs.
    fn name(&self) -> &'static str;
}

/// Fixed declaration-order rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinSelector;

impl RoundRobinSelector {
    /// Role after `last` in declaration order, wrapping to the first.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRoster` for an empty roster and `UnknownRole` when `last`
    /// is not part of it.
    #[track_caller]
    pub fn next<'r>(&self, roster: &'r Roster, last: Option<&Role>) -> AesopResult<&'r Role> {
        if roster.is_empty() {
            return Err(OrchestrationError::new(OrchestrationErrorKind::EmptyRoster).into());
        }
        let index = match last {
            None => 0,
            Some(role) => {
                let position = roster.position(role.name()).ok_or_else(|| {
                    OrchestrationError::new(OrchestrationErrorKind::UnknownRole(
                        role.name().clone(),
                    ))
                })?;
                (position + 1) % roster.len()
            }
        };
        roster
            .get(index)
            .ok_or_else(|| OrchestrationError::new(OrchestrationErrorKind::EmptyRoster).into())
    }
}

#[async_trait]
impl TurnSelector for RoundRobinSelector {
    async fn select_next<'r>(
        &self,
        _transcript: &Transcript,
        roster: &'r Roster,
        last: Option<&'r Role>,
    ) -> AesopResult<&'r Role> {
        self.next(roster, last)
    }

    fn name(&self) -> &'static str {
        "round_robin"
    }
}

/// Lets the model pick the next speaker from role descriptions and history.
pub struct LlmGuidedSelector {
    driver: Arc<dyn AesopDriver>,
    prompt: String,
    params: GenerationParams,
    allow_repeated_speaker: bool,
    fallback: RoundRobinSelector,
}

impl LlmGuidedSelector {
    /// Selector using [`DEFAULT_SELECTOR_PROMPT`] that allows repeats.
    pub fn new(driver: Arc<dyn AesopDriver>) -> Self {
        Self {
            driver,
            prompt: DEFAULT_SELECTOR_PROMPT.to_string(),
            params: GenerationParams::default(),
            allow_repeated_speaker: true,
            fallback: RoundRobinSelector,
        }
    }

    /// Use a custom template with `{roles}`, `{history}` and `{participants}`.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Model settings for selection calls.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Whether the previous speaker may be chosen again.
    pub fn with_repeated_speaker(mut self, allow: bool) -> Self {
        self.allow_repeated_speaker = allow;
        self
    }

    /// Fill the selector template for the current state of the run.
    pub fn render_prompt(&self, transcript: &Transcript, roster: &Roster) -> String {
        let roles = roster
            .iter()
            .map(|r| format!("{}: {}", r.name(), r.capability()))
            .collect::<Vec<_>>()
            .join("\n");
        let history = if transcript.is_empty() {
            "(no turns yet)".to_string()
        } else {
            transcript.render()
        };
        self.prompt
            .replace("{roles}", &roles)
            .replace("{history}", &history)
            .replace("{participants}", &participants(roster))
    }
}

impl std::fmt::Debug for LlmGuidedSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmGuidedSelector")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("allow_repeated_speaker", &self.allow_repeated_speaker)
            .finish()
    }
}

#[async_trait]
impl TurnSelector for LlmGuidedSelector {
    #[instrument(skip_all, fields(turn = transcript.len()))]
    async fn select_next<'r>(
        &self,
        transcript: &Transcript,
        roster: &'r Roster,
        last: Option<&'r Role>,
    ) -> AesopResult<&'r Role> {
        let system = self.render_prompt(transcript, roster);
        let instruction = format!(
            "Read the above conversation. Then select the next role from {} to play. Only return the role.",
            participants(roster)
        );
        // A blank reply names no role, so it falls back like any other miss.
        let request = GenerateRequest::with_params(system, instruction, &self.params);
        let response = self.driver.generate(&request).await?;
        let reply = response.text();

        let Some(choice) = parse_selection(reply, roster) else {
            warn!(reply = %reply.trim(), "Selector reply named no known role, using round-robin");
            return self.fallback.next(roster, last);
        };

        if !self.allow_repeated_speaker && last.is_some_and(|l| l.name() == choice.name()) {
            debug!(role = %choice.name(), "Repeated speaker rejected, using round-robin");
            return self.fallback.next(roster, last);
        }

        debug!(role = %choice.name(), "Selector chose role");
        Ok(choice)
    }

    fn name(&self) -> &'static str {
        "llm_guided"
    }
}

fn participants(roster: &Roster) -> String {
    format!("[{}]", roster.names().join(", "))
}

/// Resolve a free-text selector reply to a role.
///
/// Tries, in order: the trimmed reply as an exact name, the same ignoring
/// case, then the role whose name appears earliest in the reply (longest name
/// on a tie). Returns `None` when no role is mentioned.
///
/// # Examples
///
/// ```
/// use aesop_core::{Role, Roster};
/// use aesop_ensemble::parse_selection;
///
/// let roster = Roster::new(vec![
///     Role::new("Writer", "writes", "write"),
///     Role::new("Editor", "edits", "edit"),
/// ])
/// .unwrap();
///
/// assert_eq!(parse_selection("Editor", &roster).map(|r| r.name().as_str()), Some("Editor"));
/// assert_eq!(parse_selection(" writer. ", &roster).map(|r| r.name().as_str()), Some("Writer"));
/// assert_eq!(
///     parse_selection("I think the editor, then the writer", &roster).map(|r| r.name().as_str()),
///     Some("Editor")
/// );
/// assert!(parse_selection("nobody", &roster).is_none());
/// ```
pub fn parse_selection<'r>(reply: &str, roster: &'r Roster) -> Option<&'r Role> {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());

    if let Some(role) = roster.find(cleaned) {
        return Some(role);
    }
    if let Some(role) = roster.find_ignore_case(cleaned) {
        return Some(role);
    }

    let lowered = reply.to_lowercase();
    roster
        .iter()
        .filter_map(|role| {
            lowered
                .find(&role.name().to_lowercase())
                .map(|position| (position, role))
        })
        .min_by(|(pa, ra), (pb, rb)| {
            pa.cmp(pb)
                .then_with(|| rb.name().len().cmp(&ra.name().len()))
        })
        .map(|(_, role)| role)
}
