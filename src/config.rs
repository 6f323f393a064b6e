use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Runtime configuration, loaded once at startup and immutable thereafter.
/// Every field is required; a missing or null field refuses startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bot_token: String,
    pub admin_username: String,
    pub admin_chat_id: i64,
}

impl Config {
    /// Placeholder values written when no configuration file exists yet.
    fn template() -> Self {
        Self {
            bot_token: "bot token here".to_string(),
            admin_username: "Telegram username here".to_string(),
            admin_chat_id: 12345,
        }
    }
}

/// Outcome of the startup configuration check.
#[derive(Debug)]
pub enum Bootstrap {
    Loaded(Config),
    /// No configuration existed; a template was written for the operator to
    /// fill in before the next run.
    TemplateWritten,
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
    let config: Config = serde_json::from_str(&content)?;
    info!("Read JSON data at `{}`.", path.display());
    Ok(config)
}

pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    let data = serde_json::to_string_pretty(&Config::template())?;
    std::fs::write(path, data).map_err(ConfigError::Write)?;
    info!("Wrote JSON data to `{}`.", path.display());
    Ok(())
}

/// Loads the configuration, or writes the placeholder template when the file
/// does not exist. An existing file is never overwritten, even when it fails
/// to parse.
pub fn bootstrap(path: &Path) -> Result<Bootstrap, ConfigError> {
    if path.is_file() {
        load(path).map(Bootstrap::Loaded)
    } else {
        warn!("No configuration file found, creating one...");
        write_template(path)?;
        Ok(Bootstrap::TemplateWritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_writes_template_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.json");

        let outcome = bootstrap(&path).unwrap();
        assert!(matches!(outcome, Bootstrap::TemplateWritten));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["bot_token"], "bot token here");
        assert_eq!(written["admin_username"], "Telegram username here");
        assert_eq!(written["admin_chat_id"], 12345);
    }

    #[test]
    fn bootstrap_loads_a_complete_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.json");
        std::fs::write(
            &path,
            r#"{"bot_token": "123:abc", "admin_username": "operator", "admin_chat_id": 42}"#,
        )
        .unwrap();

        let outcome = bootstrap(&path).unwrap();
        let config = match outcome {
            Bootstrap::Loaded(config) => config,
            Bootstrap::TemplateWritten => panic!("existing file must be loaded, not replaced"),
        };
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.admin_username, "operator");
        assert_eq!(config.admin_chat_id, 42);
    }

    #[test]
    fn missing_field_fails_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.json");
        let content = r#"{"bot_token": "123:abc", "admin_chat_id": 42}"#;
        std::fs::write(&path, content).unwrap();

        let err = bootstrap(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn null_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.json");
        std::fs::write(
            &path,
            r#"{"bot_token": "123:abc", "admin_username": null, "admin_chat_id": 42}"#,
        )
        .unwrap();

        let err = bootstrap(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.json");
        std::fs::write(&path, "not json").unwrap();

        let err = bootstrap(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn written_template_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.json");
        write_template(&path).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.admin_chat_id, 12345);
    }
}
