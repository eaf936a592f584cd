use crate::error::ConfigError;
use crate::pitch::CleanupOutputOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default)]
    pub default_temperature: f64,
    /// Overrides the provider's built-in endpoint.
    #[serde(default)]
    pub provider_base_url: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_provider() -> String {
    "ollama".into()
}

fn default_model() -> String {
    "llama3.1".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: 0.0,
            provider_base_url: None,
            output: OutputConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::Validation(format!(
                "default_temperature must be within 0.0..=2.0, got {}",
                self.default_temperature
            )));
        }
        if self.default_provider.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_provider must not be empty".into(),
            ));
        }
        if self.default_model.trim().is_empty() {
            return Err(ConfigError::Validation("default_model must not be empty".into()));
        }
        self.observability.level()?;
        Ok(())
    }
}

// ── Output ────────────────────────────────────────────────────────

/// What `cleanup` prints to stdout. The file written by `--output` always
/// carries every key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub include_metadata: bool,
    #[serde(default)]
    pub include_system_prompt: bool,
    #[serde(default)]
    pub include_user_prompt: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_metadata: true,
            include_system_prompt: false,
            include_user_prompt: false,
        }
    }
}

impl From<&OutputConfig> for CleanupOutputOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            include_metadata: config.include_metadata,
            include_system_prompt: config.include_system_prompt,
            include_user_prompt: config.include_user_prompt,
        }
    }
}

// ── Observability ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "error" | "warn" | "info" | "debug" | "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ObservabilityConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Validation(format!("unknown log_level: {}", self.log_level)))
    }
}
