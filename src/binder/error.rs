//! Binding errors.

use thiserror::Error;

/// Why a token list could not be bound to a command's parameters.
///
/// These are user errors: the dispatcher reports them and keeps the
/// session running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A parameter without a default received no value.
    #[error("Missing required argument: '{param}'")]
    Missing {
        /// Name of the unfilled parameter.
        param: String,
    },

    /// A token could not be converted to the parameter's declared type.
    #[error("Invalid argument for '{param}': {message}")]
    Invalid {
        /// Name of the parameter.
        param: String,
        /// Conversion failure.
        message: String,
    },
}

impl BindingError {
    /// Create a Missing error.
    pub fn missing(param: impl Into<String>) -> Self {
        Self::Missing {
            param: param.into(),
        }
    }

    /// Create an Invalid error.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn param(&self) -> &str {
        match self {
            Self::Missing { param } | Self::Invalid { param, .. } => param,
        }
    }
}
