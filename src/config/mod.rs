//! Configuration for the structure viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/structview/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_BASE: &str = "http://localhost/management";
const DEFAULT_COMMAND_BASE: &str = "http://localhost/admin/command";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    /// Management API root; structures are fetched from `{api_base}/getStructure/...`
    pub api_base: String,

    /// Admin command page root; edit links point at `{command_base}/editStructure`
    pub command_base: String,

    /// Bearer token for the management API
    pub token: Option<String>,

    /// HTTP request timeout
    pub timeout_secs: u64,

    /// Whether to run the TUI (headless commands ignore this)
    pub enable_tui: bool,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            command_base: DEFAULT_COMMAND_BASE.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_tui: true,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_base: Option<String>,
    pub command_base: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/structview/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("structview").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the file exists but cannot be read or parsed:
    /// a broken config should fail loudly rather than silently use defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `structview config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base = env("STRUCTVIEW_API_BASE")
            .or(file.api_base)
            .unwrap_or(defaults.api_base);

        let command_base = env("STRUCTVIEW_COMMAND_BASE")
            .or(file.command_base)
            .unwrap_or(defaults.command_base);

        // Keeping the token out of the file is preferred; both are accepted
        let token = env("STRUCTVIEW_TOKEN")
            .or(file.token)
            .filter(|t| !t.is_empty());

        let timeout_secs = env("STRUCTVIEW_TIMEOUT")
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(defaults.timeout_secs);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("STRUCTVIEW_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_base,
            command_base,
            token,
            timeout_secs,
            enable_tui,
            logging,
        }
    }
}
