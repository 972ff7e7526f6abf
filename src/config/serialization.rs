//! Config serialization to TOML
//!
//! Single source of truth for the config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file.
    /// The token is never written; set `STRUCTVIEW_TOKEN` instead.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# structview configuration

# Management API root (structures are fetched from <api_base>/getStructure/...)
api_base = "{api_base}"

# Admin command page root (edit links point at <command_base>/editStructure)
command_base = "{command_base}"

# HTTP request timeout in seconds
timeout_secs = {timeout}

# Bearer token: prefer the STRUCTVIEW_TOKEN environment variable
# token = "..."

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the TUI log strip or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_base = self.api_base,
            command_base = self.command_base,
            timeout = self.timeout_secs,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
