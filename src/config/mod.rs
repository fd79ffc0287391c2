//! Session configuration.
//!
//! [`SessionConfig`] is plain serde data and is always available; loading
//! it from TOML requires the `config` feature.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "config")]
//! # {
//! use spaceworld::config::SessionConfig;
//!
//! let config = SessionConfig::from_toml_str(r#"default_mode = "debug""#).unwrap();
//! assert_eq!(config.default_mode, "debug");
//! assert_eq!(config.universal_mode, "all");
//! # }
//! ```

mod session;

pub use session::{LoggingConfig, MessagesConfig, SessionConfig, UNIVERSAL_MODE};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid.
    #[error("Failed to parse TOML: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
}

impl ConfigError {
    /// Create an Io error.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a Parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
