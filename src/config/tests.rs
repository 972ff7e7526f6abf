//! Configuration tests

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Values written by to_toml() must come back unchanged.
#[test]
fn test_config_roundtrip_values() {
    let mut config = Config::default();
    config.api_base = "https://cms.example/management".to_string();
    config.command_base = "https://cms.example/admin/command".to_string();
    config.timeout_secs = 5;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let loaded = Config::from_sources(file, env_from(&[]));

    assert_eq!(loaded.api_base, config.api_base);
    assert_eq!(loaded.command_base, config.command_base);
    assert_eq!(loaded.timeout_secs, 5);
    assert_eq!(loaded.logging.level, "debug");
    assert!(loaded.logging.file_enabled);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_token_is_never_serialized() {
    let mut config = Config::default();
    config.token = Some("secret-token".to_string());
    assert!(!config.to_toml().contains("secret-token"));
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_base = "http://file/management"
token = "from-file"
timeout_secs = 10
"#,
    )
    .unwrap();

    let config = Config::from_sources(
        file,
        env_from(&[
            ("STRUCTVIEW_API_BASE", "http://env/management"),
            ("STRUCTVIEW_TIMEOUT", "3"),
            ("STRUCTVIEW_NO_TUI", "1"),
        ]),
    );

    assert_eq!(config.api_base, "http://env/management");
    assert_eq!(config.command_base, DEFAULT_COMMAND_BASE);
    assert_eq!(config.token.as_deref(), Some("from-file"));
    assert_eq!(config.timeout_secs, 3);
    assert!(!config.enable_tui);
}

#[test]
fn test_defaults_without_sources() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[]));
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.token, None);
    assert!(config.enable_tui);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_empty_token_is_none() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[("STRUCTVIEW_TOKEN", "")]));
    assert_eq!(config.token, None);
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
}
