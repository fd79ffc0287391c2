//! Command definition and builder.

use super::handler::{CommandHandler, CommandResult};
use super::help;
use super::param::Param;
use crate::binder::BoundArgs;
use crate::error::RegistrationError;
use crate::runtime;
use serde::Serialize;
use std::future::Future;
use std::sync::OnceLock;

/// Mode every command is active in unless told otherwise.
pub const DEFAULT_MODE: &str = "normal";

/// A switch that is either off, on, or on with a custom message.
///
/// Used for the deprecation and confirmation settings of a command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Flag {
    /// Disabled.
    #[default]
    Off,
    /// Enabled with the default message.
    On,
    /// Enabled with a custom message.
    Message(String),
}

impl Flag {
    /// Whether the flag is enabled.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// The custom message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<&str> for Flag {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for Flag {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

/// An executable command with its metadata.
///
/// Commands are immutable once built. Help and usage text are rendered
/// lazily and cached.
#[derive(Debug)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    docs: String,
    big_docs: String,
    example: Option<String>,
    modes: Vec<String>,
    hidden: bool,
    deprecated: Flag,
    confirm: Flag,
    history: bool,
    params: Vec<Param>,
    handler: CommandHandler,
    help_text: OnceLock<String>,
    example_text: OnceLock<String>,
}

impl Command {
    /// Start building a command called `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(Some(name.into()))
    }

    /// Start building a command from a plain function, named after it.
    ///
    /// ```
    /// use spaceworld::{BoundArgs, Command};
    ///
    /// fn status(_: &BoundArgs) -> anyhow::Result<&'static str> {
    ///     Ok("ok")
    /// }
    ///
    /// let command = Command::from_fn(status).build().unwrap();
    /// assert_eq!(command.name(), "status");
    /// ```
    pub fn from_fn<F, T>(handler: F) -> CommandBuilder
    where
        F: Fn(&BoundArgs) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Serialize + 'static,
    {
        CommandBuilder::new(derive_name::<F>()).handler(handler)
    }

    /// Like [`from_fn`](Self::from_fn) for async functions.
    pub fn from_async_fn<F, Fut, T>(handler: F) -> CommandBuilder
    where
        F: Fn(BoundArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Serialize + 'static,
    {
        CommandBuilder::new(derive_name::<F>()).async_handler(handler)
    }

    /// Primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative names.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Short description.
    pub fn docs(&self) -> &str {
        &self.docs
    }

    /// Long description, falling back to the short one.
    pub fn big_docs(&self) -> &str {
        if self.big_docs.is_empty() {
            &self.docs
        } else {
            &self.big_docs
        }
    }

    /// Explicit usage example, if one was given.
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// Modes the command is active in, lowercased.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Whether the command is left out of listings.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Deprecation setting.
    pub fn deprecated(&self) -> &Flag {
        &self.deprecated
    }

    /// Confirmation setting.
    pub fn confirm(&self) -> &Flag {
        &self.confirm
    }

    /// Whether successful runs are recorded in the session history.
    pub fn records_history(&self) -> bool {
        self.history
    }

    /// Declared parameters in binding order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The handler.
    pub fn handler(&self) -> &CommandHandler {
        &self.handler
    }

    /// Whether the command may run in `mode`.
    ///
    /// Comparison is case-insensitive; a command declaring `universal`
    /// runs in every mode.
    pub fn is_active_in(&self, mode: &str, universal: &str) -> bool {
        let mode = mode.to_lowercase();
        let universal = universal.to_lowercase();
        self.modes.iter().any(|m| *m == mode || *m == universal)
    }

    /// Run the command, awaiting async handlers.
    pub async fn call(&self, args: BoundArgs) -> CommandResult {
        self.handler.call(args).await
    }

    /// Run the command to completion from synchronous code.
    ///
    /// Async handlers are driven on a suitable runtime, see
    /// [`runtime::block_on`].
    pub fn invoke(&self, args: BoundArgs) -> CommandResult {
        match &self.handler {
            CommandHandler::Sync(handler) => handler(&args),
            CommandHandler::Async(_) => runtime::block_on(self.call(args))?,
        }
    }

    /// Full help text.
    pub fn help_text(&self) -> &str {
        self.help_text.get_or_init(|| help::render_help(self))
    }

    /// Usage example: the explicit one, or a synopsis built from the parameters.
    pub fn example_text(&self) -> &str {
        self.example_text.get_or_init(|| match &self.example {
            Some(example) => example.clone(),
            None => help::render_synopsis(self),
        })
    }
}

fn derive_name<F>() -> Option<String> {
    let full = std::any::type_name::<F>();
    full.rsplit("::").next().map(str::to_string)
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.starts_with('-') {
        return Err(format!("'{}' would be read as a flag", name));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '{' || c == '}') {
        return Err(format!("'{}' is not a valid command name", name));
    }
    Ok(())
}

/// Builder for [`Command`].
#[derive(Debug)]
pub struct CommandBuilder {
    name: Option<String>,
    aliases: Vec<String>,
    docs: String,
    big_docs: String,
    example: Option<String>,
    modes: Vec<String>,
    hidden: bool,
    deprecated: Flag,
    confirm: Flag,
    history: bool,
    params: Vec<Param>,
    handler: Option<CommandHandler>,
}

impl CommandBuilder {
    fn new(name: Option<String>) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            docs: String::new(),
            big_docs: String::new(),
            example: None,
            modes: vec![DEFAULT_MODE.to_string()],
            hidden: false,
            deprecated: Flag::Off,
            confirm: Flag::Off,
            history: true,
            params: Vec::new(),
            handler: None,
        }
    }

    /// Override the command name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add several aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Short description shown in listings.
    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = docs.into();
        self
    }

    /// Long description shown in the command help.
    pub fn big_docs(mut self, docs: impl Into<String>) -> Self {
        self.big_docs = docs.into();
        self
    }

    /// Explicit usage example.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Replace the activation modes.
    pub fn modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes.clear();
        for mode in modes {
            let mode = mode.into().to_lowercase();
            if !self.modes.contains(&mode) {
                self.modes.push(mode);
            }
        }
        self
    }

    /// Hide the command from listings.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Mark the command deprecated, optionally with a custom message.
    pub fn deprecated(mut self, deprecated: impl Into<Flag>) -> Self {
        self.deprecated = deprecated.into();
        self
    }

    /// Require confirmation, optionally with a custom prompt.
    pub fn confirm(mut self, confirm: impl Into<Flag>) -> Self {
        self.confirm = confirm.into();
        self
    }

    /// Whether successful runs are recorded in history.
    pub fn history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    /// Append a parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Append several parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Set a synchronous handler.
    pub fn handler<F, T>(mut self, handler: F) -> Self
    where
        F: Fn(&BoundArgs) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Serialize + 'static,
    {
        self.handler = Some(CommandHandler::from_sync(handler));
        self
    }

    /// Set an async handler.
    pub fn async_handler<F, Fut, T>(mut self, handler: F) -> Self
    where
        F: Fn(BoundArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Serialize + 'static,
    {
        self.handler = Some(CommandHandler::from_async(handler));
        self
    }

    /// Validate and build the command.
    pub fn build(self) -> Result<Command, RegistrationError> {
        let name = self.name.unwrap_or_default();
        validate_name(&name).map_err(|reason| RegistrationError::invalid_command(&name, reason))?;
        for alias in &self.aliases {
            validate_name(alias).map_err(|reason| RegistrationError::invalid_command(&name, reason))?;
        }
        let handler = self
            .handler
            .ok_or_else(|| RegistrationError::invalid_command(&name, "no handler set"))?;

        Ok(Command {
            name,
            aliases: self.aliases,
            docs: self.docs,
            big_docs: self.big_docs,
            example: self.example,
            modes: self.modes,
            hidden: self.hidden,
            deprecated: self.deprecated,
            confirm: self.confirm,
            history: self.history,
            params: self.params,
            handler,
            help_text: OnceLock::new(),
            example_text: OnceLock::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ParamType;
    use serde_json::json;

    fn double(args: &BoundArgs) -> anyhow::Result<i64> {
        Ok(args.get::<i64>("n")? * 2)
    }

    #[test]
    fn test_from_fn_derives_name() {
        let command = Command::from_fn(double)
            .param(Param::positional("n", ParamType::Int))
            .build()
            .unwrap();
        assert_eq!(command.name(), "double");
        assert_eq!(command.modes(), &["normal".to_string()]);
        assert!(command.records_history());
    }

    #[test]
    fn test_closure_needs_explicit_name() {
        let err = Command::from_fn(|_: &BoundArgs| Ok(())).build().unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidCommand { .. }));

        let command = Command::from_fn(|_: &BoundArgs| Ok(()))
            .name("noop")
            .build()
            .unwrap();
        assert_eq!(command.name(), "noop");
    }

    #[test]
    fn test_build_requires_handler() {
        let err = Command::builder("x").build().unwrap_err();
        assert_eq!(err, RegistrationError::invalid_command("x", "no handler set"));
    }

    #[test]
    fn test_invalid_alias_rejected() {
        let err = Command::builder("x")
            .alias("--y")
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("flag"));
    }

    #[test]
    fn test_modes_are_lowercased_and_deduplicated() {
        let command = Command::builder("x")
            .modes(["Debug", "debug", "ALL"])
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap();
        assert_eq!(command.modes(), &["debug".to_string(), "all".to_string()]);
        assert!(command.is_active_in("DEBUG", "all"));
        assert!(command.is_active_in("anything", "all"));
    }

    #[test]
    fn test_mode_gate() {
        let command = Command::builder("x")
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap();
        assert!(command.is_active_in("Normal", "all"));
        assert!(!command.is_active_in("debug", "all"));
    }

    #[test]
    fn test_flag_conversions() {
        assert_eq!(Flag::from(false), Flag::Off);
        assert_eq!(Flag::from(true), Flag::On);
        assert_eq!(Flag::from("careful").message(), Some("careful"));
        assert!(Flag::from("careful").is_set());
        assert!(!Flag::Off.is_set());
    }

    #[test]
    fn test_big_docs_fallback() {
        let command = Command::builder("x")
            .docs("short")
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap();
        assert_eq!(command.big_docs(), "short");
    }

    #[test]
    fn test_invoke_sync_outside_runtime() {
        let command = Command::from_fn(double)
            .param(Param::positional("n", ParamType::Int))
            .build()
            .unwrap();
        let out = command
            .invoke(BoundArgs::new().with_positional("n", 4))
            .unwrap();
        assert_eq!(out, json!(8));
    }

    #[test]
    fn test_invoke_async_outside_runtime() {
        let command = Command::builder("wait")
            .async_handler(|_: BoundArgs| async {
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
                anyhow::Ok("done")
            })
            .build()
            .unwrap();
        assert_eq!(command.invoke(BoundArgs::new()).unwrap(), json!("done"));
    }

    #[tokio::test]
    async fn test_invoke_async_inside_current_thread_runtime() {
        let command = Command::builder("wait")
            .async_handler(|_: BoundArgs| async { anyhow::Ok(1) })
            .build()
            .unwrap();
        assert_eq!(command.invoke(BoundArgs::new()).unwrap(), json!(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_invoke_async_inside_multi_thread_runtime() {
        let command = Command::builder("wait")
            .async_handler(|_: BoundArgs| async { anyhow::Ok(2) })
            .build()
            .unwrap();
        assert_eq!(command.invoke(BoundArgs::new()).unwrap(), json!(2));
    }
}
