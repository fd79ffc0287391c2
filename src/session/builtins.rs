//! The built-in `sw` module.

use super::state::SessionHandle;
use crate::binder::BoundArgs;
use crate::command::{Command, Param, ParamType};
use crate::error::RegistrationError;
use crate::module::Module;
use crate::writer::Writer;
use std::sync::Arc;

/// Name of the built-in module.
pub const BUILTIN_MODULE: &str = "sw";

/// Build the `sw` module: `help`, `set`, `mode` and `history`.
///
/// Every command is active in `universal_mode`, which must match the
/// session's configured universal mode.
pub fn module(universal_mode: &str) -> Result<Module, RegistrationError> {
    let mut module = Module::new(BUILTIN_MODULE, "Base commands of the console");

    module.add_command(
        Command::builder("help")
            .docs("Lists every module and command")
            .modes([universal_mode])
            .history(false)
            .params(injected())
            .handler(|args: &BoundArgs| {
                let session = args.require::<SessionHandle>()?;
                let writer = args.require::<Arc<dyn Writer>>()?;
                writer.write(&[&session.catalog().join("\n")]);
                Ok(())
            })
            .build()?,
    )?;

    module.add_command(
        Command::builder("set")
            .docs("Switches the console mode")
            .example("sw set [mode_name] - sw set debug")
            .modes([universal_mode])
            .params(injected())
            .param(Param::positional("mode_name", ParamType::Str))
            .handler(|args: &BoundArgs| {
                let session = args.require::<SessionHandle>()?;
                let writer = args.require::<Arc<dyn Writer>>()?;
                let mode: String = args.get("mode_name")?;
                session.set_mode(mode.as_str());
                writer.write(&[&"Mode set to", &mode]);
                Ok(mode)
            })
            .build()?,
    )?;

    module.add_command(
        Command::builder("mode")
            .docs("Shows the current mode")
            .modes([universal_mode])
            .history(false)
            .params(injected())
            .handler(|args: &BoundArgs| {
                let session = args.require::<SessionHandle>()?;
                let writer = args.require::<Arc<dyn Writer>>()?;
                let mode = session.mode();
                writer.write(&[&"Current mode:", &mode]);
                Ok(mode)
            })
            .build()?,
    )?;

    module.add_command(
        Command::builder("history")
            .docs("Shows executed commands")
            .modes([universal_mode])
            .history(false)
            .params(injected())
            .handler(|args: &BoundArgs| {
                let session = args.require::<SessionHandle>()?;
                let writer = args.require::<Arc<dyn Writer>>()?;
                let history = session.history();
                for (idx, line) in history.iter().enumerate() {
                    writer.write(&[&format!("{:>4}", idx + 1), line]);
                }
                Ok(history)
            })
            .build()?,
    )?;

    Ok(module)
}

fn injected() -> [Param; 2] {
    [
        Param::inject::<SessionHandle>("session"),
        Param::inject::<Arc<dyn Writer>>("writer"),
    ]
}

/// Listing of every root module, submodule and visible command.
pub(crate) fn catalog(modules: &[Module]) -> Vec<String> {
    let mut lines = Vec::new();
    for module in modules {
        lines.push(format!("{} - {}", module.name(), module.docs()));
        walk(module, module.name(), &mut lines);
    }
    lines
}

fn walk(module: &Module, path: &str, lines: &mut Vec<String>) {
    for child in module.submodules() {
        let child_path = format!("{} {}", path, child.name());
        lines.push(format!("{} - {}", child_path, child.docs()));
        walk(child, &child_path, lines);
    }
    for command in module.commands().filter(|c| !c.is_hidden()) {
        lines.push(format!("{} {} - {}", path, command.name(), command.docs()));
    }
}
