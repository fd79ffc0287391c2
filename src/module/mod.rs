//! Modules: named, nested registries of commands.
//!
//! A [`Module`] owns its commands and submodules. Command names and aliases
//! are unique within one module, not globally, so `files ls` and `net ls`
//! can coexist.

mod provider;

pub use provider::{FactoryProvider, ModuleFactory, ModuleProvider, StaticProvider};

use crate::command::Command;
use crate::error::RegistrationError;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

/// A named group of commands and submodules.
///
/// # Example
///
/// ```
/// use spaceworld::{BoundArgs, Command, Module};
///
/// let mut files = Module::new("files", "File helpers");
/// files
///     .add_command(
///         Command::builder("ls")
///             .alias("list")
///             .handler(|_: &BoundArgs| Ok(()))
///             .build()
///             .unwrap(),
///     )
///     .unwrap();
///
/// assert!(files.command("list").is_some());
/// assert_eq!(files.commands().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Module {
	name: String,
	docs: String,
	commands: Vec<Arc<Command>>,
	command_index: HashMap<String, usize>,
	submodules: Vec<Module>,
	submodule_index: HashMap<String, usize>,
}

impl Module {
	/// Create an empty module.
	pub fn new(name: impl Into<String>, docs: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			docs: docs.into(),
			commands: Vec::new(),
			command_index: HashMap::new(),
			submodules: Vec::new(),
			submodule_index: HashMap::new(),
		}
	}

	/// Module name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Module description.
	pub fn docs(&self) -> &str {
		&self.docs
	}

	/// Register a command under its name and every alias.
	///
	/// Fails without inserting anything if any of those names is taken,
	/// including by another name of the same command.
	pub fn add_command(&mut self, command: Command) -> Result<Arc<Command>, RegistrationError> {
		let mut seen: Vec<&str> = Vec::new();
		for name in command.names() {
			if self.command_index.contains_key(name) || seen.contains(&name) {
				return Err(RegistrationError::command(&self.name, name));
			}
			seen.push(name);
		}

		let command = Arc::new(command);
		let idx = self.commands.len();
		for name in command.names() {
			self.command_index.insert(name.to_string(), idx);
		}
		self.commands.push(Arc::clone(&command));
		debug!(module = %self.name, command = %command.name(), "command registered");
		Ok(command)
	}

	/// Register a submodule and return it for further registration.
	pub fn add_submodule(&mut self, module: Module) -> Result<&mut Module, RegistrationError> {
		if self.submodule_index.contains_key(&module.name) {
			return Err(RegistrationError::submodule(&self.name, &module.name));
		}
		let idx = self.submodules.len();
		self.submodule_index.insert(module.name.clone(), idx);
		self.submodules.push(module);
		Ok(&mut self.submodules[idx])
	}

	/// Create, register and return an empty submodule.
	pub fn submodule(
		&mut self,
		name: impl Into<String>,
		docs: impl Into<String>,
	) -> Result<&mut Module, RegistrationError> {
		self.add_submodule(Module::new(name, docs))
	}

	/// Look up a command by name or alias.
	pub fn command(&self, name: &str) -> Option<&Arc<Command>> {
		self.command_index.get(name).map(|&idx| &self.commands[idx])
	}

	/// Look up a direct submodule.
	pub fn submodule_ref(&self, name: &str) -> Option<&Module> {
		self.submodule_index.get(name).map(|&idx| &self.submodules[idx])
	}

	/// Commands in registration order, each listed once.
	pub fn commands(&self) -> impl Iterator<Item = &Arc<Command>> {
		self.commands.iter()
	}

	/// Submodules in registration order.
	pub fn submodules(&self) -> impl Iterator<Item = &Module> {
		self.submodules.iter()
	}

	/// Help text listing visible commands and submodules.
	pub fn help_doc(&self) -> String {
		let mut out = String::new();
		if self.docs.is_empty() {
			let _ = writeln!(out, "Module `{}`", self.name);
		} else {
			let _ = writeln!(out, "Module `{}` - {}", self.name, self.docs);
		}

		let visible: Vec<&Arc<Command>> = self.commands.iter().filter(|c| !c.is_hidden()).collect();
		if !visible.is_empty() {
			out.push_str("Commands:\n");
			for command in visible {
				let _ = writeln!(out, "\t{}\t{}", command.example_text(), command.docs());
			}
		}

		if !self.submodules.is_empty() {
			out.push_str("Submodules:\n");
			for module in &self.submodules {
				let _ = writeln!(out, "\t{}\t{}", module.name, module.docs);
			}
		}

		out.push_str("Module Flags:\n");
		out.push_str("\t--help\\-h\tDisplays the help\n");
		out.push_str("\t--force\\-f\tSkips command confirmations\n");
		let _ = write!(
			out,
			"For reference on a specific command:\n\t{} <command> --help/-h",
			self.name
		);
		out
	}
}
