//! Session configuration and its TOML loading.

#[cfg(feature = "config")]
use super::ConfigError;
use crate::command::DEFAULT_MODE;
use serde::{Deserialize, Serialize};

/// Mode name that activates a command in every mode.
pub const UNIVERSAL_MODE: &str = "all";

/// Settings for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Mode the session starts in.
    #[serde(default = "default_mode")]
    pub default_mode: String,
    /// Mode name that makes a command available in every mode.
    #[serde(default = "default_universal_mode")]
    pub universal_mode: String,
    /// Echo every dispatched line as `>>> line`.
    #[serde(default = "default_echo_input")]
    pub echo_input: bool,
    /// User-facing message templates.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

fn default_universal_mode() -> String {
    UNIVERSAL_MODE.to_string()
}

fn default_echo_input() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            universal_mode: default_universal_mode(),
            echo_input: default_echo_input(),
            messages: MessagesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Texts written by the dispatcher.
///
/// Prefixes are followed by a space and the relevant detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Warning written before running a deprecated command.
    pub deprecated: String,
    /// Prompt prefix for commands requiring confirmation.
    pub confirm: String,
    /// Written when a confirmation is declined.
    pub cancelled: String,
    /// Prefix for unknown or mode-gated commands.
    pub wrong_command: String,
    /// Prefix for handler failures.
    pub execution_error: String,
    /// Prefix written when a confirmed command starts.
    pub executing: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            deprecated: "This command is deprecated and will be removed in future versions."
                .to_string(),
            confirm: "You are confirming the execution of the command".to_string(),
            cancelled: "The command has been cancelled.".to_string(),
            wrong_command: "Wrong command:".to_string(),
            execution_error: "Error when executing the command:".to_string(),
            executing: "Executing the command:".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when the environment does not set one.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(feature = "config")]
impl SessionConfig {
    /// Parse configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.default_mode, "normal");
        assert_eq!(config.universal_mode, "all");
        assert!(config.echo_input);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.messages.cancelled, "The command has been cancelled.");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
default_mode = "debug"
echo_input = false

[messages]
cancelled = "Aborted."

[logging]
level = "debug"
"#;
        let config = SessionConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.default_mode, "debug");
        assert_eq!(config.universal_mode, "all");
        assert!(!config.echo_input);
        assert_eq!(config.messages.cancelled, "Aborted.");
        assert_eq!(config.messages.wrong_command, "Wrong command:");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml() {
        let err = SessionConfig::from_toml_str("default_mode = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "universal_mode = \"any\"").unwrap();
        let config = SessionConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.universal_mode, "any");
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
