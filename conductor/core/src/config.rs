//! TOML Configuration File Support
//!
//! Loads settings for a chat session from `~/.config/baatcheet/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file follows XDG Base Directory specification:
//! - `$XDG_CONFIG_HOME/baatcheet/config.toml` (typically `~/.config/baatcheet/config.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [reply]
//! base_delay_ms = 1000
//! jitter_ms = 1000
//! seed = 42
//!
//! [locale]
//! utc_offset_minutes = 330
//!
//! [session]
//! greeting = "नमस्ते!"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conductor::ConductorConfig;

/// Longest base delay or jitter accepted, in milliseconds
pub const MAX_DELAY_MS: u64 = 60_000;

/// Largest UTC offset accepted, in minutes
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Reply section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyToml {
    /// Minimum reply delay in milliseconds
    pub base_delay_ms: Option<u64>,

    /// Maximum extra random delay in milliseconds
    pub jitter_ms: Option<u64>,

    /// Seed for reproducible fallbacks and delays
    pub seed: Option<u64>,
}

/// Locale section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleToml {
    /// Fixed UTC offset for timestamps, in minutes east of UTC
    pub utc_offset_minutes: Option<i32>,
}

/// Session section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionToml {
    /// Replacement for the seed greeting
    pub greeting: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatToml {
    /// Reply timing section
    pub reply: ReplyToml,

    /// Locale section
    pub locale: LocaleToml,

    /// Session section
    pub session: SessionToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Fully resolved configuration plus where it came from
#[derive(Clone, Debug)]
pub struct ChatConfigFile {
    /// Settings handed to the conductor
    pub conductor: ConductorConfig,

    /// Fixed UTC offset in minutes, as configured
    pub utc_offset_minutes: Option<i32>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ChatConfigFile {
    fn default() -> Self {
        Self {
            conductor: ConductorConfig::default(),
            utc_offset_minutes: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ChatConfigFile {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check value ranges and resolve the UTC offset
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending value.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let delay = self.conductor.reply_delay;
        let max = Duration::from_millis(MAX_DELAY_MS);
        if delay.base > max {
            return Err(ConfigError::ValidationError(format!(
                "base_delay_ms {} exceeds {MAX_DELAY_MS}",
                delay.base.as_millis()
            )));
        }
        if delay.jitter > max {
            return Err(ConfigError::ValidationError(format!(
                "jitter_ms {} exceeds {MAX_DELAY_MS}",
                delay.jitter.as_millis()
            )));
        }

        if self.conductor.greeting.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "greeting must not be blank".to_string(),
            ));
        }

        self.conductor.utc_offset = match self.utc_offset_minutes {
            Some(minutes) => Some(utc_offset(minutes)?),
            None => None,
        };

        Ok(())
    }
}

fn utc_offset(minutes: i32) -> Result<FixedOffset, ConfigError> {
    if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
        return Err(ConfigError::ValidationError(format!(
            "utc_offset_minutes {minutes} is outside ±{MAX_UTC_OFFSET_MINUTES}"
        )));
    }
    FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
        ConfigError::ValidationError(format!("utc_offset_minutes {minutes} is not a valid offset"))
    })
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/baatcheet/config.toml` or
/// `~/.config/baatcheet/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("baatcheet").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if a
/// resolved value fails validation. A missing config file is not an error.
pub fn load_config() -> Result<ChatConfigFile, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if validation fails.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ChatConfigFile, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration reading environment variables through `env`
///
/// [`load_config_from_path`] passes the process environment; pass
/// `|_| None` to resolve from the file and defaults alone.
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(
    path: Option<PathBuf>,
    env: F,
) -> Result<ChatConfigFile, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = ChatConfigFile::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ChatToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Environment overrides file values
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ChatConfigFile, toml: &ChatToml) {
    if let Some(ms) = toml.reply.base_delay_ms {
        config.conductor.reply_delay.base = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.reply.jitter_ms {
        config.conductor.reply_delay.jitter = Duration::from_millis(ms);
    }
    if toml.reply.seed.is_some() {
        config.conductor.rng_seed = toml.reply.seed;
    }

    if toml.locale.utc_offset_minutes.is_some() {
        config.utc_offset_minutes = toml.locale.utc_offset_minutes;
    }

    if let Some(ref greeting) = toml.session.greeting {
        config.conductor.greeting = greeting.clone();
    }
}

/// Parse an environment value, warning about garbage instead of failing
fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = key, value = value, "Ignoring unparseable environment value");
            None
        }
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut ChatConfigFile, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env("BAATCHEET_BASE_DELAY_MS") {
        if let Some(ms) = parse_env::<u64>("BAATCHEET_BASE_DELAY_MS", &value) {
            config.conductor.reply_delay.base = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("BAATCHEET_JITTER_MS") {
        if let Some(ms) = parse_env::<u64>("BAATCHEET_JITTER_MS", &value) {
            config.conductor.reply_delay.jitter = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("BAATCHEET_SEED") {
        if let Some(seed) = parse_env::<u64>("BAATCHEET_SEED", &value) {
            config.conductor.rng_seed = Some(seed);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("BAATCHEET_UTC_OFFSET_MINUTES") {
        if let Some(minutes) = parse_env::<i32>("BAATCHEET_UTC_OFFSET_MINUTES", &value) {
            config.utc_offset_minutes = Some(minutes);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(greeting) = env("BAATCHEET_GREETING") {
        config.conductor.greeting = greeting;
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides,
/// then call [`ChatConfigFile::validate`] again.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Base delay override (milliseconds)
    pub base_delay_ms: Option<u64>,

    /// Jitter override (milliseconds)
    pub jitter_ms: Option<u64>,

    /// RNG seed override
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base delay override
    #[must_use]
    pub fn with_base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = Some(ms);
        self
    }

    /// Set jitter override
    #[must_use]
    pub fn with_jitter_ms(mut self, ms: u64) -> Self {
        self.jitter_ms = Some(ms);
        self
    }

    /// Set seed override
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_delay_ms.is_none() && self.jitter_ms.is_none() && self.seed.is_none()
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut ChatConfigFile) {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }

        if let Some(ms) = self.base_delay_ms {
            config.conductor.reply_delay.base = Duration::from_millis(ms);
        }
        if let Some(ms) = self.jitter_ms {
            config.conductor.reply_delay.jitter = Duration::from_millis(ms);
        }
        if self.seed.is_some() {
            config.conductor.rng_seed = self.seed;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
