//! Crate-level error types.

use crate::binder::BindingError;
use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised while building up modules, commands and dependencies.
///
/// Registration errors are programmer errors: they surface when the
/// command tree is assembled, never while dispatching user input.
///
/// # Example
///
/// ```
/// use spaceworld::RegistrationError;
///
/// let error = RegistrationError::command("files", "ls");
/// assert!(error.to_string().contains("ls"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
	/// A command name or alias is already taken inside the module.
	#[error("command already registered in module '{module}': {name}")]
	Command {
		/// Module that owns the conflicting name.
		module: String,
		/// The conflicting command name or alias.
		name: String,
	},

	/// A submodule with the same name already exists.
	#[error("submodule '{name}' already exists in module '{module}'")]
	Submodule {
		/// Parent module.
		module: String,
		/// Name of the duplicate submodule.
		name: String,
	},

	/// A root module with the same name is already registered with the session.
	#[error("module already registered: {name}")]
	Module {
		/// Name of the duplicate module.
		name: String,
	},

	/// A dependency of the same type is already registered.
	#[error("dependency already registered: {type_name}")]
	Dependency {
		/// Type name of the duplicate dependency.
		type_name: String,
	},

	/// A dependency update targeted a type that was never registered.
	#[error("no dependency registered for: {type_name}")]
	MissingDependency {
		/// Type name that was looked up.
		type_name: String,
	},

	/// A command definition could not be built.
	#[error("invalid command definition '{name}': {reason}")]
	InvalidCommand {
		/// Name of the command being built.
		name: String,
		/// Why the definition was rejected.
		reason: String,
	},
}

impl RegistrationError {
	/// Create a Command error.
	pub fn command(module: impl Into<String>, name: impl Into<String>) -> Self {
		Self::Command {
			module: module.into(),
			name: name.into(),
		}
	}

	/// Create a Submodule error.
	pub fn submodule(module: impl Into<String>, name: impl Into<String>) -> Self {
		Self::Submodule {
			module: module.into(),
			name: name.into(),
		}
	}

	/// Create a Module error.
	pub fn module(name: impl Into<String>) -> Self {
		Self::Module { name: name.into() }
	}

	/// Create a Dependency error.
	pub fn dependency(type_name: impl Into<String>) -> Self {
		Self::Dependency {
			type_name: type_name.into(),
		}
	}

	/// Create a MissingDependency error.
	pub fn missing_dependency(type_name: impl Into<String>) -> Self {
		Self::MissingDependency {
			type_name: type_name.into(),
		}
	}

	/// Create an InvalidCommand error.
	pub fn invalid_command(name: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidCommand {
			name: name.into(),
			reason: reason.into(),
		}
	}
}

/// Umbrella error for fallible operations outside of dispatch.
#[derive(Debug, Error)]
pub enum Error {
	/// Building the command tree failed.
	#[error(transparent)]
	Registration(#[from] RegistrationError),

	/// Arguments could not be bound.
	#[error(transparent)]
	Binding(#[from] BindingError),

	/// Configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A runtime for driving async handlers could not be started.
	#[error("failed to start async runtime: {0}")]
	Runtime(#[from] std::io::Error),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
