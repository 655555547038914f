//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Attribute columns shown when nothing else is configured.
pub const DEFAULT_COLUMNS: [&str; 6] = [
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
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
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pagesel/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Artificial delay added to every page fetch, in milliseconds.
    #[serde(default)]
    pub fetch_delay_ms: Option<u64>,

    /// Record attributes shown as table columns, in order.
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    /// Heading shown above the table.
    #[serde(default)]
    pub title: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page (at least 1).
    pub page_size: usize,
    /// Artificial fetch delay in milliseconds.
    pub fetch_delay_ms: u64,
    /// Table columns.
    pub columns: Vec<String>,
    /// Heading above the table.
    pub title: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fetch_delay_ms: 0,
            columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            title: "Records".to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// CLI values that override every other source when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--fetch-delay-ms`
    pub fetch_delay_ms: Option<u64>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pagesel/pagesel.log` on Unix-like systems,
/// or the platform state directory elsewhere. Falls back to the current
/// directory when no state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pagesel").join("pagesel.log")
    } else {
        PathBuf::from("pagesel.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/pagesel/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pagesel").join("config.toml"))
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

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGESEL_CONFIG` environment variable
/// 3. Default path `~/.config/pagesel/config.toml`
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

    if let Ok(env_path) = std::env::var("PAGESEL_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
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
        page_size: config.page_size.unwrap_or(defaults.page_size).max(1),
        fetch_delay_ms: config.fetch_delay_ms.unwrap_or(defaults.fetch_delay_ms),
        columns: config
            .columns
            .filter(|columns| !columns.is_empty())
            .unwrap_or(defaults.columns),
        title: config.title.unwrap_or(defaults.title),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGESEL_PAGE_SIZE`: rows per page
/// - `PAGESEL_FETCH_DELAY_MS`: artificial fetch delay
///
/// Values that do not parse are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(page_size) = env_number::<usize>("PAGESEL_PAGE_SIZE") {
        config.page_size = page_size.max(1);
    }

    if let Some(delay) = env_number::<u64>("PAGESEL_FETCH_DELAY_MS") {
        config.fetch_delay_ms = delay;
    }

    config
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size.max(1);
    }

    if let Some(delay) = cli.fetch_delay_ms {
        config.fetch_delay_ms = delay;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
