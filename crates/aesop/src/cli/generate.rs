//! Story generation command handler.

use super::GenerateArgs;
use crate::build_driver;
use aesop_core::DEFAULT_TARGET_WORD_COUNT;
use aesop_ensemble::{AesopConfig, StoryAnalysis, StoryGenerator, StoryOutcome};
use aesop_error::AesopResult;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Load the layered configuration, plus `path` when given.
///
/// # Errors
///
/// Fails when a file is missing or malformed, or the merged result is invalid.
pub fn load_config(path: Option<&Path>) -> AesopResult<AesopConfig> {
    match path {
        Some(path) => AesopConfig::load_from(path),
        None => AesopConfig::load(),
    }
}

/// Fold command-line overrides into the loaded configuration.
pub fn apply_overrides(config: AesopConfig, args: &GenerateArgs) -> AesopConfig {
    let model = config.model().clone().with_overrides(
        args.provider.map(Into::into),
        args.model.clone(),
        args.base_url.clone(),
    );

    let mut run = config.run().clone();
    if let Some(max_turns) = args.max_turns {
        run = run.with_max_turns(max_turns);
    }
    if args.timeout_secs.is_some() {
        run = run.with_timeout_secs(args.timeout_secs);
    }

    let selector = match args.selector {
        Some(policy) => config.selector().clone().with_policy(policy.into()),
        None => config.selector().clone(),
    };

    config.with_model(model).with_run(run).with_selector(selector)
}

/// Execute `aesop generate`.
///
/// Ctrl-C cancels the run, abandoning any in-flight model call.
pub async fn run_generate(config_path: Option<&Path>, args: &GenerateArgs) -> anyhow::Result<ExitCode> {
    let config = apply_overrides(load_config(config_path)?, args);
    config.validate()?;

    let api_key = config.api_key(args.api_key.clone())?;
    let driver = build_driver(config.model(), api_key)?;

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling the run");
            ctrl_c.cancel();
        }
    });

    let generator = StoryGenerator::new(config, driver)?.with_cancellation(token);
    let mut stdout = std::io::stdout().lock();
    tell_story(&generator, args, &mut stdout).await
}

/// Generate one story and write it, and whatever else `args` asks for, to `out`.
///
/// Returns a failure exit code when the run failed; nothing is saved then.
///
/// # Errors
///
/// Fails for a blank title, an invalid roster, or an I/O error while writing.
pub async fn tell_story<W: Write>(
    generator: &StoryGenerator,
    args: &GenerateArgs,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    let outcome = generator.generate(&args.title, &args.genre).await?;

    if args.transcript {
        write_transcript(&outcome, out)?;
    }

    let story = outcome.render();
    writeln!(out, "{story}")?;

    if args.analyze {
        let target = (*generator.config().run().target_word_count())
            .unwrap_or(DEFAULT_TARGET_WORD_COUNT);
        let text = outcome.artifact().map(|a| a.text().as_str()).unwrap_or_default();
        writeln!(out, "\n{}", StoryAnalysis::with_target(text, target))?;
    }

    if !outcome.run().is_completed() {
        if let Some(path) = save_path(&outcome, args) {
            warn!(path = %path.display(), "Run failed, story not saved");
        }
        return Ok(ExitCode::FAILURE);
    }

    if let Some(path) = save_path(&outcome, args) {
        std::fs::write(&path, &story)
            .with_context(|| format!("Failed to write story to {}", path.display()))?;
        info!(path = %path.display(), "Story saved");
    }

    Ok(ExitCode::SUCCESS)
}

fn save_path(outcome: &StoryOutcome, args: &GenerateArgs) -> Option<PathBuf> {
    match (&args.output, args.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(outcome.file_name())),
        (None, false) => None,
    }
}

fn write_transcript<W: Write>(outcome: &StoryOutcome, out: &mut W) -> std::io::Result<()> {
    for turn in outcome.transcript() {
        writeln!(out, "--- Turn {} ({}) ---", turn.index() + 1, turn.role())?;
        writeln!(out, "{}\n", turn.text())?;
    }
    writeln!(out, "=== {} ({}) ===", outcome.title(), outcome.genre())
}
