//! Layered configuration loading.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (`aesop.toml` shipped with the library)
//! 2. `~/.config/aesop/aesop.toml`
//! 3. `./aesop.toml`
//! 4. `AESOP__SECTION__KEY` environment variables

use crate::selector::DEFAULT_SELECTOR_PROMPT;
use aesop_core::{GenerationParams, Role, RunConfig, Roster};
use aesop_error::{
    AesopError, AesopResult, BuilderError, BuilderErrorKind, ConfigError, OrchestrationError,
    OrchestrationErrorKind,
};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../../../aesop.toml");

const LIST_KEYS: [&str; 4] = [
    "run.required_keywords",
    "run.chatter_prefixes",
    "run.chatter_sentinels",
    "story.genres",
];

/// Model provider backing a run.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    /// OpenAI chat completions
    #[default]
    OpenAI,
    /// Anthropic messages
    Anthropic,
}

impl Provider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// `[model]` section: passed through to the driver unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ModelSettings {
    /// Backend
    provider: Provider,
    /// Model identifier
    name: String,
    /// Sampling temperature
    temperature: f32,
    /// Output token limit
    max_tokens: u32,
    /// Alternative server root for OpenAI-compatible endpoints
    base_url: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAI,
            name: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            base_url: None,
        }
    }
}

impl ModelSettings {
    /// Request parameters for every model call.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the parameters cannot be assembled.
    pub fn params(&self) -> AesopResult<GenerationParams> {
        GenerationParams::builder()
            .model(self.name.clone())
            .temperature(Some(self.temperature))
            .max_tokens(Some(self.max_tokens))
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::Params(e.to_string())).into())
    }

    /// Same settings with another provider, model or server root.
    pub fn with_overrides(
        mut self,
        provider: Option<Provider>,
        name: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if base_url.is_some() {
            self.base_url = base_url;
        }
        self
    }
}

/// Turn selection policy.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SelectorPolicy {
    /// Declaration-order rotation
    #[default]
    RoundRobin,
    /// Model picks the next speaker, falling back to rotation
    LlmGuided,
}

/// `[selector]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct SelectorSettings {
    /// Policy
    policy: SelectorPolicy,
    /// Whether the previous speaker may be picked again
    allow_repeated_speaker: bool,
    /// Template with `{roles}`, `{history}` and `{participants}`
    prompt: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            policy: SelectorPolicy::RoundRobin,
            allow_repeated_speaker: true,
            prompt: DEFAULT_SELECTOR_PROMPT.to_string(),
        }
    }
}

impl SelectorSettings {
    /// Same settings with another policy.
    pub fn with_policy(mut self, policy: SelectorPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// `[story]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StorySettings {
    /// Known genres
    genres: Vec<String>,
    /// Genre used when none is given
    default_genre: String,
    /// Title suggested when none is given
    default_title: String,
    /// Reader age range
    audience: String,
    /// Chapters requested from the writer
    chapter_count: usize,
    /// Goal template
    task_template: String,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            genres: [
                "Fantasy",
                "Adventure",
                "Fairy Tale",
                "Science Fiction",
                "Mystery",
                "Animal Story",
                "Friendship",
                "Educational",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            default_genre: "Fantasy".to_string(),
            default_title: "A Magical Adventure".to_string(),
            audience: "4-10".to_string(),
            chapter_count: 5,
            task_template: "Create a children's story titled \"{title}\" in the {genre} genre for readers aged {audience}, in {chapter_count} chapters of about {target_words} words in total. End with \"{marker}\" when the complete story is ready.".to_string(),
        }
    }
}

impl StorySettings {
    /// True when `genre` is one of the configured genres, ignoring case.
    pub fn is_known_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }
}

/// Top-level Aesop configuration.
///
/// # Example
///
/// ```
/// use aesop_ensemble::AesopConfig;
///
/// let config = AesopConfig::bundled().unwrap();
/// assert_eq!(config.model().name(), "gpt-4o-mini");
/// assert_eq!(config.roles().len(), 3);
/// config.validate().unwrap();
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct AesopConfig {
    /// Model settings
    model: ModelSettings,
    /// Run parameters
    run: RunConfig,
    /// Selection policy
    selector: SelectorSettings,
    /// Story shape
    story: StorySettings,
    /// Roster in declaration order
    roles: Vec<Role>,
}

impl AesopConfig {
    /// Bundled defaults only, ignoring user files and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    #[instrument]
    pub fn bundled() -> AesopResult<Self> {
        Self::finish(Self::defaults())
    }

    /// Load a single file with no other sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AesopResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Load with precedence: environment > current dir > home dir > bundled.
    ///
    /// User files are optional and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if any present source fails to parse.
    #[instrument]
    pub fn load() -> AesopResult<Self> {
        Self::load_layered(None)
    }

    /// Like [`load`](Self::load) with `path` layered above the user files.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or any source fails to parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> AesopResult<Self> {
        Self::load_layered(Some(path.as_ref()))
    }

    /// Like [`load`](Self::load), reading `AESOP__*` overrides from `vars`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any source fails to parse.
    pub fn load_with_vars<I, K, V>(vars: I) -> AesopResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::finish(Self::files(None).add_source(Self::environment().source(Some(vars))))
    }

    fn load_layered(explicit: Option<&Path>) -> AesopResult<Self> {
        Self::finish(Self::files(explicit).add_source(Self::environment()))
    }

    fn files(explicit: Option<&Path>) -> ConfigBuilder<DefaultState> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/aesop/aesop.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("aesop").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder
    }

    /// `AESOP__SECTION__KEY` overrides; list keys take comma-separated values.
    fn environment() -> Environment {
        LIST_KEYS.iter().fold(
            Environment::with_prefix("AESOP")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .try_parsing(true),
            |env, key| env.with_list_parse_key(key),
        )
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> AesopResult<Self> {
        builder
            .build()
            .map_err(|e| {
                AesopError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AesopError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Check everything a run needs before any model is called.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error for an empty or duplicated roster, an
    /// invalid run section, or out-of-range model settings.
    pub fn validate(&self) -> AesopResult<()> {
        self.run.validate()?;
        Roster::new(self.roles.clone())?;

        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::new(format!(
                "model.temperature must be between 0 and 2, got {}",
                self.model.temperature
            ))
            .into());
        }
        if self.model.max_tokens == 0 {
            return Err(ConfigError::new("model.max_tokens must be positive").into());
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::new("model.name must not be empty").into());
        }
        Ok(())
    }

    /// Validated roster built from `[[roles]]`.
    ///
    /// # Errors
    ///
    /// Fails for an empty roster or duplicated names.
    pub fn roster(&self) -> AesopResult<Roster> {
        Roster::new(self.roles.clone())
    }

    /// Resolve the API key for the configured provider.
    ///
    /// An explicit key wins over the provider's environment variable.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when neither is set.
    pub fn api_key(&self, explicit: Option<String>) -> AesopResult<String> {
        self.resolve_api_key(explicit, |var| std::env::var(var).ok())
    }

    /// [`api_key`](Self::api_key) with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when neither source yields a non-blank key.
    pub fn resolve_api_key(
        &self,
        explicit: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AesopResult<String> {
        let var = self.model.provider.api_key_var();
        explicit
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(var).filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                OrchestrationError::new(OrchestrationErrorKind::MissingCredentials(format!(
                    "{var} is not set"
                )))
                .into()
            })
    }

    /// Replace the model section.
    pub fn with_model(mut self, model: ModelSettings) -> Self {
        self.model = model;
        self
    }

    /// Replace the run section.
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Replace the selector section.
    pub fn with_selector(mut self, selector: SelectorSettings) -> Self {
        self.selector = selector;
        self
    }

    /// Replace the roster.
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }
}
