//! The dispatcher.
//!
//! A [`Session`] owns the root modules, the dependency registry and the
//! mutable state (mode, history, pending confirmation). Input is dispatched
//! line by line:
//!
//! 1. a pending confirmation consumes the line as its reply;
//! 2. otherwise the tokens are resolved down the module tree;
//! 3. the command's mode gate is checked;
//! 4. `--help` short-circuits to the command help;
//! 5. the remaining tokens are bound to the command's parameters;
//! 6. deprecation warnings and confirmation prompts are written;
//! 7. the handler runs and, on success, the line is added to history.
//!
//! Failures are reported through the [`Writer`] and never stop later lines.

pub mod builtins;
mod outcome;
mod resolve;
mod state;

pub use outcome::DispatchOutcome;
pub use state::{SessionHandle, SessionState};

use crate::binder::{bind, classify, DependencyRegistry};
use crate::command::Command;
use crate::config::SessionConfig;
use crate::error::RegistrationError;
use crate::module::{Module, ModuleProvider};
use crate::runtime;
use crate::writer::Writer;
use resolve::{resolve, Resolution};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A running console.
///
/// # Example
///
/// ```
/// use spaceworld::{BoundArgs, BufferWriter, Command, DispatchOutcome, Module, Session};
/// use std::sync::Arc;
///
/// let mut math = Module::new("math", "Arithmetic");
/// math.add_command(
///     Command::builder("double")
///         .param(spaceworld::Param::positional("n", spaceworld::ParamType::Int))
///         .handler(|args: &BoundArgs| Ok(args.get::<i64>("n")? * 2))
///         .build()
///         .unwrap(),
/// )
/// .unwrap();
///
/// let writer = Arc::new(BufferWriter::new());
/// let mut session = Session::new(writer.clone());
/// session.register_module(math).unwrap();
///
/// let outcomes = session.execute_blocking("math double 21").unwrap();
/// assert_eq!(outcomes, vec![DispatchOutcome::Executed(42.into())]);
/// ```
pub struct Session {
    modules: Vec<Module>,
    dependencies: DependencyRegistry,
    state: SessionHandle,
    writer: Arc<dyn Writer>,
    config: SessionConfig,
}

impl Session {
    /// Session with default configuration.
    pub fn new(writer: Arc<dyn Writer>) -> Self {
        Self::with_config(SessionConfig::default(), writer)
    }

    /// Session with explicit configuration.
    ///
    /// The session's [`SessionHandle`] and the writer are registered as
    /// dependencies, so commands can ask for either.
    pub fn with_config(config: SessionConfig, writer: Arc<dyn Writer>) -> Self {
        let state = SessionHandle::new(config.default_mode.as_str());
        let mut dependencies = DependencyRegistry::new();
        dependencies.register_or_replace(state.clone());
        dependencies.register_or_replace(Arc::clone(&writer));

        Self {
            modules: Vec::new(),
            dependencies,
            state,
            writer,
            config,
        }
    }

    /// Register the built-in `sw` module, active in the configured
    /// universal mode.
    pub fn with_builtins(mut self) -> Result<Self, RegistrationError> {
        let builtins = builtins::module(&self.config.universal_mode)?;
        self.register_module(builtins)?;
        Ok(self)
    }

    /// Register a root module. Root names are unique per session.
    pub fn register_module(&mut self, module: Module) -> Result<(), RegistrationError> {
        if self.module(module.name()).is_some() {
            return Err(RegistrationError::module(module.name()));
        }
        debug!(module = %module.name(), "module registered");
        self.modules.push(module);
        self.state.set_catalog(builtins::catalog(&self.modules));
        Ok(())
    }

    /// Register every module a provider discovers.
    ///
    /// Discovery and registration failures are logged and skipped. Returns
    /// the number of modules registered.
    pub fn include_modules(&mut self, provider: &dyn ModuleProvider) -> usize {
        let modules = match provider.discover() {
            Ok(modules) => modules,
            Err(e) => {
                warn!(source = %provider.source(), error = %e, "module discovery failed");
                return 0;
            }
        };

        let mut count = 0;
        for module in modules {
            let name = module.name().to_string();
            match self.register_module(module) {
                Ok(()) => count += 1,
                Err(e) => {
                    warn!(source = %provider.source(), module = %name, error = %e, "skipping module");
                }
            }
        }
        info!(source = %provider.source(), count, "modules included");
        count
    }

    /// Root modules in registration order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Root module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }

    /// Dependency registry.
    pub fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }

    /// Mutable dependency registry.
    pub fn dependencies_mut(&mut self) -> &mut DependencyRegistry {
        &mut self.dependencies
    }

    /// Register a dependency. Fails if its type is already registered.
    pub fn register_dependency<T: Any + Send + Sync>(&mut self, value: T) -> Result<(), RegistrationError> {
        self.dependencies.register(value)
    }

    /// Replace a dependency. Fails if its type was never registered.
    pub fn replace_dependency<T: Any + Send + Sync>(&mut self, value: T) -> Result<(), RegistrationError> {
        self.dependencies.replace(value)
    }

    /// Handle to the shared state.
    pub fn handle(&self) -> SessionHandle {
        self.state.clone()
    }

    /// Output sink.
    pub fn writer(&self) -> &Arc<dyn Writer> {
        &self.writer
    }

    /// Configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current mode.
    pub fn mode(&self) -> String {
        self.state.mode()
    }

    /// Switch mode. Any string is accepted.
    pub fn set_mode(&self, mode: impl Into<String>) {
        self.state.set_mode(mode);
    }

    /// Successful commands so far.
    pub fn history(&self) -> Vec<String> {
        self.state.history()
    }

    /// Command waiting for confirmation.
    pub fn pending_confirmation(&self) -> Option<String> {
        self.state.pending()
    }

    /// Listing of every visible module and command.
    pub fn catalog(&self) -> Vec<String> {
        self.state.catalog()
    }

    /// Dispatch every line of `input`.
    ///
    /// Blank lines are skipped unless they answer a pending confirmation.
    pub async fn execute(&mut self, input: &str) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::new();
        for line in input.lines() {
            if let Some(outcome) = self.dispatch_line(line).await {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Dispatch several inputs in order.
    pub async fn execute_all<I, S>(&mut self, inputs: I) -> Vec<DispatchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcomes = Vec::new();
        for input in inputs {
            outcomes.extend(self.execute(input.as_ref()).await);
        }
        outcomes
    }

    /// [`execute`](Self::execute) from synchronous code.
    pub fn execute_blocking(&mut self, input: &str) -> crate::Result<Vec<DispatchOutcome>> {
        Ok(runtime::block_on(self.execute(input))?)
    }

    /// Dispatch one line. Returns `None` for a blank line with nothing pending.
    pub async fn dispatch_line(&mut self, line: &str) -> Option<DispatchOutcome> {
        let line = line.trim();

        if let Some(pending) = self.state.take_pending() {
            return Some(self.answer_confirmation(line, &pending).await);
        }
        if line.is_empty() {
            return None;
        }

        if self.config.echo_input {
            self.writer.write(&[&format!(">>> {}", line)]);
        }

        let outcome = self.run(line, false).await;
        if matches!(outcome, DispatchOutcome::NotFound | DispatchOutcome::WrongMode) {
            self.writer.error(&[&self.config.messages.wrong_command, &line]);
        }
        Some(outcome)
    }

    async fn answer_confirmation(&mut self, reply: &str, command: &str) -> DispatchOutcome {
        let reply = reply.to_lowercase();
        if reply == "y" || reply == "yes" {
            self.writer.info(&[&self.config.messages.executing, &command]);
            let outcome = self.run(command, true).await;
            if matches!(outcome, DispatchOutcome::NotFound | DispatchOutcome::WrongMode) {
                self.writer.error(&[&self.config.messages.wrong_command, &command]);
            }
            outcome
        } else {
            debug!(command, "confirmation declined");
            self.writer.warning(&[&self.config.messages.cancelled]);
            DispatchOutcome::Cancelled
        }
    }

    async fn run(&mut self, line: &str, confirmed: bool) -> DispatchOutcome {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();

        let (command, args): (Arc<Command>, Vec<String>) = match resolve(&self.modules, &tokens) {
            Resolution::Command { command, args } => (command, args.to_vec()),
            Resolution::Module { module, rest } => {
                let rest = classify(rest);
                if rest.positional().is_empty() && rest.help_requested() {
                    self.writer.write(&[&module.help_doc()]);
                    return DispatchOutcome::Help;
                }
                debug!(line, "no command at module path");
                return DispatchOutcome::NotFound;
            }
            Resolution::NotFound => {
                debug!(line, "no matching root module");
                return DispatchOutcome::NotFound;
            }
        };

        let mode = self.state.mode();
        if !command.is_active_in(&mode, &self.config.universal_mode) {
            debug!(command = %command.name(), mode = %mode, "command not active in mode");
            return DispatchOutcome::WrongMode;
        }

        let mut tokens = classify(&args);
        if tokens.help_requested() {
            self.writer.write(&[&command.help_text()]);
            return DispatchOutcome::Help;
        }
        let forced = command.confirm().is_set() && tokens.take_force();

        let bound = match bind(&tokens, command.params(), &self.dependencies) {
            Ok(bound) => bound,
            Err(e) => {
                debug!(command = %command.name(), error = %e, "binding failed");
                self.writer.error(&[&e]);
                return DispatchOutcome::InvalidArguments(e);
            }
        };

        if !confirmed {
            if command.deprecated().is_set() {
                let message = command
                    .deprecated()
                    .message()
                    .unwrap_or(self.config.messages.deprecated.as_str());
                self.writer.warning(&[&message]);
            }
            if command.confirm().is_set() && !forced {
                let prompt = command
                    .confirm()
                    .message()
                    .unwrap_or(self.config.messages.confirm.as_str());
                self.writer
                    .input_info(&[&prompt, &format!("{}? (y/n)", line)]);
                self.state.set_pending(line);
                return DispatchOutcome::Pending;
            }
        }

        debug!(command = %command.name(), "executing");
        match command.call(bound).await {
            Ok(output) => {
                if command.records_history() {
                    self.state.push_history(line);
                }
                DispatchOutcome::Executed(output)
            }
            Err(e) => {
                warn!(command = %command.name(), error = %e, "command failed");
                self.writer
                    .error(&[&self.config.messages.execution_error, &e]);
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("modules", &self.modules.iter().map(Module::name).collect::<Vec<_>>())
            .field("dependencies", &self.dependencies)
            .field("state", &self.state.snapshot())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::BoundArgs;
    use crate::command::{Param, ParamType};
    use crate::writer::{BufferWriter, Level};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> (Session, Arc<BufferWriter>) {
        let writer = Arc::new(BufferWriter::new());
        let mut session = Session::new(writer.clone());

        let mut tools = Module::new("tools", "Tools");
        tools
            .add_command(
                Command::builder("add")
                    .param(Param::positional("a", ParamType::Int))
                    .param(Param::positional("b", ParamType::Int))
                    .handler(|args: &BoundArgs| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        tools
            .add_command(
                Command::builder("wipe")
                    .confirm(true)
                    .handler(|_: &BoundArgs| Ok("wiped"))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        tools
            .add_command(
                Command::builder("debug-only")
                    .modes(["debug"])
                    .handler(|_: &BoundArgs| Ok(()))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        session.register_module(tools).unwrap();
        (session, writer)
    }

    #[tokio::test]
    async fn test_execute_records_history() {
        let (mut session, writer) = session();
        let outcomes = session.execute("tools add 2 3").await;
        assert_eq!(outcomes, vec![DispatchOutcome::Executed(json!(5))]);
        assert_eq!(session.history(), vec!["tools add 2 3"]);
        assert_eq!(writer.messages(Level::Write), vec![">>> tools add 2 3"]);
    }

    #[tokio::test]
    async fn test_wrong_command_is_reported() {
        let (mut session, writer) = session();
        let outcomes = session.execute("tools nope").await;
        assert_eq!(outcomes, vec![DispatchOutcome::NotFound]);
        assert_eq!(writer.messages(Level::Error), vec!["Wrong command: tools nope"]);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_module_help() {
        let (mut session, writer) = session();
        assert_eq!(session.execute("tools -h").await, vec![DispatchOutcome::Help]);
        assert!(writer.contains("Module `tools` - Tools"));
    }

    #[tokio::test]
    async fn test_unknown_command_with_help_is_wrong_command() {
        let (mut session, writer) = session();
        let outcomes = session.execute("tools nope --help").await;
        assert_eq!(outcomes, vec![DispatchOutcome::NotFound]);
        assert_eq!(
            writer.messages(Level::Error),
            vec!["Wrong command: tools nope --help"]
        );
        assert!(!writer.contains("Module `tools`"));
    }

    #[tokio::test]
    async fn test_builtins_use_configured_universal_mode() {
        let writer = Arc::new(BufferWriter::new());
        let config = SessionConfig {
            universal_mode: "any".to_string(),
            ..SessionConfig::default()
        };
        let mut session = Session::with_config(config, writer.clone())
            .with_builtins()
            .unwrap();

        let outcomes = session.execute("sw set debug").await;
        assert_eq!(outcomes, vec![DispatchOutcome::Executed(json!("debug"))]);
        assert_eq!(session.mode(), "debug");
        assert!(session.execute("sw mode").await[0].is_success());
    }

    #[tokio::test]
    async fn test_mode_gate_looks_like_wrong_command() {
        let (mut session, writer) = session();
        assert_eq!(
            session.execute("tools debug-only").await,
            vec![DispatchOutcome::WrongMode]
        );
        assert!(writer.contains("Wrong command: tools debug-only"));

        session.set_mode("DEBUG");
        assert_eq!(
            session.execute("tools debug-only").await,
            vec![DispatchOutcome::Executed(json!(null))]
        );
    }

    #[tokio::test]
    async fn test_confirmation_flow() {
        let (mut session, writer) = session();
        assert_eq!(session.execute("tools wipe").await, vec![DispatchOutcome::Pending]);
        assert_eq!(session.pending_confirmation().as_deref(), Some("tools wipe"));
        assert_eq!(
            writer.messages(Level::Input),
            vec!["You are confirming the execution of the command tools wipe? (y/n)"]
        );

        assert_eq!(
            session.execute("Y").await,
            vec![DispatchOutcome::Executed(json!("wiped"))]
        );
        assert!(writer.contains("Executing the command: tools wipe"));
        assert_eq!(session.pending_confirmation(), None);
        assert_eq!(session.history(), vec!["tools wipe"]);
    }

    #[tokio::test]
    async fn test_blank_reply_cancels() {
        let (mut session, writer) = session();
        session.execute("tools wipe").await;
        assert_eq!(
            session.dispatch_line("").await,
            Some(DispatchOutcome::Cancelled)
        );
        assert_eq!(writer.messages(Level::Warning), vec!["The command has been cancelled."]);
        assert!(session.history().is_empty());
        assert_eq!(session.dispatch_line("   ").await, None);
    }

    #[tokio::test]
    async fn test_binding_error_is_reported() {
        let (mut session, writer) = session();
        let outcomes = session.execute("tools add 1").await;
        assert_eq!(
            outcomes,
            vec![DispatchOutcome::InvalidArguments(
                crate::binder::BindingError::missing("b")
            )]
        );
        assert_eq!(
            writer.messages(Level::Error),
            vec!["Missing required argument: 'b'"]
        );
    }

    #[test]
    fn test_duplicate_root_module() {
        let (mut session, _) = session();
        let err = session.register_module(Module::new("tools", "")).unwrap_err();
        assert_eq!(err, RegistrationError::module("tools"));
    }

    #[test]
    fn test_session_dependencies_registered() {
        let (session, _) = session();
        assert!(session.dependencies().get::<SessionHandle>().is_some());
        assert!(session.dependencies().get::<Arc<dyn Writer>>().is_some());
    }

    #[test]
    fn test_execute_blocking() {
        let (mut session, _) = session();
        let outcomes = session.execute_blocking("tools add 1 1\n\ntools add 2 2").unwrap();
        assert_eq!(
            outcomes,
            vec![
                DispatchOutcome::Executed(json!(2)),
                DispatchOutcome::Executed(json!(4))
            ]
        );
    }
}
