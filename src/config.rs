//! Typed configuration loaded from `config.yaml`.
//!
//! The schema is fixed and every field has a documented default, so a
//! missing file (or an empty document) behaves exactly like a file full
//! of defaults. The configuration is loaded once at startup and passed
//! by reference into the pipeline; nothing mutates it afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Provider looked up when `default_provider` is not configured.
pub const DEFAULT_PROVIDER: &str = "openai";
/// Model used when a provider entry does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Endpoint used when a provider entry does not name one.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const DEFAULT_VERBOSITY: i64 = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_provider: Option<String>,
    pub providers: HashMap<String, ProviderConfig>,
    pub prompt_template: Option<String>,
    verbosity: Option<i64>,
    pub suspicious_command_detection: DetectionConfig,
}

impl Config {
    /// Verbosity for user-facing diagnostics, clamped to >= 0.
    pub fn verbosity(&self) -> u8 {
        self.verbosity
            .unwrap_or(DEFAULT_VERBOSITY)
            .clamp(0, i64::from(u8::MAX)) as u8
    }

    /// Name of the provider used for command generation.
    pub fn default_provider(&self) -> &str {
        self.default_provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }

    /// Look up a provider entry, treating an empty entry as missing.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name).filter(|p| p.is_configured())
    }
}

/// Credentials and endpoint for one named remote inference backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_url: Option<String>,
}

impl ProviderConfig {
    /// An entry with no fields set behaves like a missing entry.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.model.is_some() || self.api_url.is_some()
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Settings for the suspicious-command screening stages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Substrings checked in configured order, case-sensitively.
    pub suspicious_substrings: Vec<String>,
    pub provider_detection: ProviderDetection,
}

/// Optional second-stage classification through a provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderDetection {
    pub enabled: bool,
    pub provider: Option<String>,
    pub prompt_template: Option<String>,
}

impl ProviderDetection {
    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }
}

/// Well-known config location: `config.yaml` next to the executable.
pub fn default_config_path() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe_path) => exe_path
            .parent()
            .map(|p| p.join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml")),
        Err(_) => PathBuf::from("config.yaml"),
    }
}

/// Load the configuration file, returning defaults if it is absent.
///
/// An empty document also yields defaults; YAML that does not match the
/// schema is a startup error rather than a silently-ignored file.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    if !path.is_file() {
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
