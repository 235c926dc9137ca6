//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Service address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Seconds a request may take before it is reported as timed out.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Line shown under the title on the start screen.
pub const DEFAULT_TAGLINE: &str = "Search from ~26,000 webpages!";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "OSQ_CONFIG";

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV_VAR: &str = "OSQ_BASE_URL";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value the client cannot work with.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Name of the offending setting.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/osq/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Root URL of the search service.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Results requested per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Show the relevance score on result cards.
    #[serde(default)]
    pub show_scores: Option<bool>,

    /// Start screen tagline.
    #[serde(default)]
    pub tagline: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args. Values
/// are not checked until [`ResolvedConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Root URL of the search service.
    pub base_url: String,
    /// Results requested per page.
    pub page_size: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Show the relevance score on result cards.
    pub show_scores: bool,
    /// Start screen tagline.
    pub tagline: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: crate::model::DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            show_scores: false,
            tagline: DEFAULT_TAGLINE.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Configuration that passed validation, in the types the client uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root URL of the search service (http or https).
    pub base_url: Url,
    /// Results requested per page.
    pub page_size: NonZeroUsize,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Show the relevance score on result cards.
    pub show_scores: bool,
    /// Start screen tagline.
    pub tagline: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Check every value and convert to [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero page size, a zero
    /// timeout, or a base URL that is not an absolute http(s) URL.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let base_url = parse_base_url(&self.base_url)?;

        let page_size =
            NonZeroUsize::new(self.page_size).ok_or_else(|| ConfigError::InvalidValue {
                key: "page_size",
                reason: "must be at least 1".to_string(),
            })?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Settings {
            base_url,
            page_size,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            show_scores: self.show_scores,
            tagline: self.tagline,
            log_file_path: self.log_file_path,
        })
    }
}

/// Parse a service base URL, accepting only http and https.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the URL does not parse or uses
/// another scheme.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        key: "base_url",
        reason: format!("{:?} is not a valid URL: {}", raw, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            key: "base_url",
            reason: format!("unsupported scheme {:?}, expected http or https", other),
        }),
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/osq/osq.log` on Unix-like systems, or the platform
/// equivalent. Falls back to the current directory when no state directory
/// can be determined.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("osq").join("osq.log"),
        None => PathBuf::from("osq.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/osq/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("osq").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `OSQ_CONFIG` environment variable
/// 3. Default path `~/.config/osq/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        base_url: config.base_url.unwrap_or(defaults.base_url),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        show_scores: config.show_scores.unwrap_or(defaults.show_scores),
        tagline: config.tagline.unwrap_or(defaults.tagline),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `OSQ_BASE_URL`: Override the service base URL
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
        if !base_url.trim().is_empty() {
            config.base_url = base_url;
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    base_url_override: Option<String>,
    page_size_override: Option<usize>,
    show_scores_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(base_url) = base_url_override {
        config.base_url = base_url;
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if let Some(show_scores) = show_scores_override {
        config.show_scores = show_scores;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
