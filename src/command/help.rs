//! Help and usage rendering for commands.

use super::definition::Command;
use super::param::{Param, ParamKind, ParamType};
use serde_json::Value;
use std::fmt::Write;

const NO_DOCS: &str = "None documentation";

/// `name [a: int] [--b: bool = 'false'] ...`, dependencies omitted.
pub(crate) fn render_synopsis(command: &Command) -> String {
    let mut out = command.name().to_string();
    for param in visible(command.params()) {
        let _ = write!(
            out,
            " [{}{}: {}",
            param.kind.prefix(),
            param.name,
            param.ty
        );
        if let Some(default) = &param.default {
            let _ = write!(out, " = '{}'", render_value(default));
        }
        out.push(']');
    }
    out
}

pub(crate) fn render_help(command: &Command) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", command.name());
    if !command.aliases().is_empty() {
        let _ = writeln!(out, "Aliases: {}", command.aliases().join(", "));
    }
    let docs = if command.big_docs().is_empty() {
        NO_DOCS
    } else {
        command.big_docs()
    };
    let _ = writeln!(out, "Docs: {}", docs);
    let _ = writeln!(out, "Usage: {}", command.example_text());

    let modes: Vec<String> = command.modes().iter().map(|m| capitalize(m)).collect();
    let _ = writeln!(out, "Modes: {}", modes.join(", "));

    let (args, options): (Vec<&Param>, Vec<&Param>) =
        visible(command.params()).partition(|param| is_argument(param));

    if !args.is_empty() {
        out.push_str("Args:\n");
        for param in args {
            let _ = writeln!(out, "  {}", describe(param));
        }
    }

    out.push_str("Options:\n");
    for param in options {
        let _ = writeln!(out, "  {}", describe(param));
    }
    out.push_str("  --help\\-h: Displays the help on the command\n");
    if command.confirm().is_set() {
        out.push_str("  --force\\-f: Skips the confirmation prompt\n");
    }

    let _ = writeln!(out, "Hidden: {}", yes_no(command.is_hidden()));
    match command.deprecated().message() {
        Some(message) => {
            let _ = writeln!(out, "Deprecated the message: {}", message);
        }
        None => {
            let _ = writeln!(out, "Deprecated: {}", yes_no(command.deprecated().is_set()));
        }
    }
    match command.confirm().message() {
        Some(message) => {
            let _ = write!(out, "Confirming the message: {}", message);
        }
        None => {
            let _ = write!(
                out,
                "Confirmation is required: {}",
                yes_no(command.confirm().is_set())
            );
        }
    }
    out
}

fn visible(params: &[Param]) -> impl Iterator<Item = &Param> {
    params.iter().filter(|param| !param.is_injected())
}

fn is_argument(param: &Param) -> bool {
    !param.kind.is_keyword() && param.ty != ParamType::Bool
}

fn describe(param: &Param) -> String {
    let prefix = match (param.kind, &param.ty) {
        (ParamKind::Positional, ParamType::Bool) => "--",
        (kind, _) => kind.prefix(),
    };
    let mut line = format!("{}{}: {}", prefix, param.name, param.ty);
    if let Some(default) = &param.default {
        let _ = write!(line, " = {}", render_value(default));
    }
    line
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "YES"
    } else {
        "NO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::BoundArgs;
    use crate::command::{Flag, Param};
    use pretty_assertions::assert_eq;

    fn greet() -> Command {
        Command::builder("greet")
            .alias("hi")
            .docs("Say hello")
            .modes(["normal", "debug"])
            .confirm(true)
            .param(Param::inject::<String>("store"))
            .param(Param::positional("name", ParamType::Str))
            .param(Param::keyword("times", ParamType::Int).with_default(1))
            .param(Param::flag("loud"))
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_synopsis() {
        assert_eq!(
            greet().example_text(),
            "greet [name: str] [--times: int = '1'] [--loud: bool = 'false']"
        );
    }

    #[test]
    fn test_explicit_example_wins() {
        let command = Command::builder("x")
            .example("x 1 2 3")
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap();
        assert_eq!(command.example_text(), "x 1 2 3");
    }

    #[test]
    fn test_help_layout() {
        let expected = "\
Name: greet
Aliases: hi
Docs: Say hello
Usage: greet [name: str] [--times: int = '1'] [--loud: bool = 'false']
Modes: Normal, Debug
Args:
  name: str
Options:
  --times: int = 1
  --loud: bool = false
  --help\\-h: Displays the help on the command
  --force\\-f: Skips the confirmation prompt
Hidden: NO
Deprecated: NO
Confirmation is required: YES";
        assert_eq!(greet().help_text(), expected);
    }

    #[test]
    fn test_help_messages_and_missing_docs() {
        let command = Command::builder("old")
            .deprecated("use new")
            .confirm(Flag::Message("sure?".into()))
            .handler(|_: &BoundArgs| Ok(()))
            .build()
            .unwrap();
        let help = command.help_text();
        assert!(help.contains("Docs: None documentation"));
        assert!(help.contains("Deprecated the message: use new"));
        assert!(help.contains("Confirming the message: sure?"));
        assert!(!help.contains("Args:"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("normal"), "Normal");
        assert_eq!(capitalize(""), "");
    }
}
