//! Walking tokens down the module tree.

use crate::command::Command;
use crate::module::Module;
use std::sync::Arc;

/// Where a token path leads.
#[derive(Debug)]
pub(crate) enum Resolution<'a> {
    /// A command, with the tokens left for the binder.
    Command {
        command: Arc<Command>,
        args: &'a [String],
    },
    /// A module, with any tokens after its path.
    Module {
        module: &'a Module,
        rest: &'a [String],
    },
    NotFound,
}

/// Resolve `tokens` against the root modules.
///
/// The first token names a root module; following tokens descend into
/// submodules until one names a command of the current module.
pub(crate) fn resolve<'a>(roots: &'a [Module], tokens: &'a [String]) -> Resolution<'a> {
    let Some((first, mut rest)) = tokens.split_first() else {
        return Resolution::NotFound;
    };
    let Some(mut module) = roots.iter().find(|m| m.name() == first.as_str()) else {
        return Resolution::NotFound;
    };

    while let Some((token, tail)) = rest.split_first() {
        if let Some(child) = module.submodule_ref(token) {
            module = child;
            rest = tail;
            continue;
        }
        if let Some(command) = module.command(token) {
            return Resolution::Command {
                command: Arc::clone(command),
                args: tail,
            };
        }
        break;
    }

    Resolution::Module { module, rest }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::BoundArgs;

    fn tree() -> Vec<Module> {
        let mut root = Module::new("root", "");
        let child = root.submodule("child", "").unwrap();
        child
            .add_command(
                Command::builder("run")
                    .alias("r")
                    .handler(|_: &BoundArgs| Ok(()))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        vec![root]
    }

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_resolves_nested_alias() {
        let roots = tree();
        let toks = tokens("root child r 1 --x");
        match resolve(&roots, &toks) {
            Resolution::Command { command, args } => {
                assert_eq!(command.name(), "run");
                assert_eq!(args, &["1".to_string(), "--x".to_string()]);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_root() {
        let roots = tree();
        assert!(matches!(resolve(&roots, &tokens("nope run")), Resolution::NotFound));
        assert!(matches!(resolve(&roots, &[]), Resolution::NotFound));
    }

    #[test]
    fn test_stops_at_module() {
        let roots = tree();
        let toks = tokens("root child --help");
        match resolve(&roots, &toks) {
            Resolution::Module { module, rest } => {
                assert_eq!(module.name(), "child");
                assert_eq!(rest, &["--help".to_string()]);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }
}
