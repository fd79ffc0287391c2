//! Interactive SpaceWorld console.
//!
//! Runs one command given on the command line, or reads commands from stdin
//! until `exit`, `quit` or end of input.

use anyhow::Context;
use clap::Parser;
use spaceworld::observability::init_logging;
use spaceworld::prelude::*;
use spaceworld::FactoryProvider;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Interactive command console.
#[derive(Parser, Debug)]
#[command(name = "spaceworld")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Mode to start in, overriding the configuration
    #[arg(short, long, value_name = "MODE")]
    mode: Option<String>,

    /// Log filter when SPACEWORLD_LOG is unset (e.g. debug, spaceworld=trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Command to run instead of starting the console
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::from_toml_file(path)?,
        None => SessionConfig::default(),
    };
    init_logging(cli.log_level.as_deref().unwrap_or(config.logging.level.as_str()));

    let writer: Arc<dyn Writer> = Arc::new(ConsoleWriter::new());
    let mut session = Session::with_config(config, writer).with_builtins()?;
    session.include_modules(&demo_modules());
    if let Some(mode) = cli.mode {
        session.set_mode(mode);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    if !cli.command.is_empty() {
        let outcomes = runtime.block_on(session.execute(&cli.command.join(" ")));
        if outcomes.last() == Some(&DispatchOutcome::Pending) {
            let reply = lines.next().transpose()?.unwrap_or_default();
            runtime.block_on(session.execute(&reply));
        }
        return Ok(());
    }

    loop {
        if session.pending_confirmation().is_none() {
            print!("{}> ", session.mode());
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if session.pending_confirmation().is_none() && matches!(line.trim(), "exit" | "quit") {
            break;
        }
        runtime.block_on(session.execute(&line));
    }

    Ok(())
}

fn demo_modules() -> FactoryProvider {
    FactoryProvider::new("demo").factory("spaceworld", || {
        let mut module = Module::new("spaceworld", "Demo commands");

        module.add_command(
            Command::builder("hello")
                .docs("Greets someone after a short pause")
                .confirm("Greet")
                .param(Param::inject::<Arc<dyn Writer>>("writer"))
                .param(Param::positional("name", ParamType::Str).with_default("world"))
                .param(Param::keyword("delay", ParamType::Int).with_default(100))
                .async_handler(|args: BoundArgs| async move {
                    let delay: u64 = args.get("delay")?;
                    let name: String = args.get("name")?;
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    let writer = args.require::<Arc<dyn Writer>>()?;
                    writer.write(&[&"Hello,", &name]);
                    anyhow::Ok(name)
                })
                .build()?,
        )?;

        module.add_command(
            Command::builder("echo")
                .docs("Prints its arguments")
                .modes(["normal", "debug"])
                .param(Param::inject::<Arc<dyn Writer>>("writer"))
                .param(Param::var_positional("words", ParamType::Str))
                .handler(|args: &BoundArgs| {
                    let words: Vec<String> = args.rest("words")?;
                    let writer = args.require::<Arc<dyn Writer>>()?;
                    writer.write(&[&words.join(" ")]);
                    Ok(words)
                })
                .build()?,
        )?;

        module.add_command(
            Command::builder("sum")
                .alias("add")
                .docs("Adds integers")
                .param(Param::inject::<Arc<dyn Writer>>("writer"))
                .param(Param::var_positional("numbers", ParamType::Int))
                .handler(|args: &BoundArgs| {
                    let total: i64 = args.rest::<i64>("numbers")?.iter().sum();
                    let writer = args.require::<Arc<dyn Writer>>()?;
                    writer.write(&[&total]);
                    Ok(total)
                })
                .build()?,
        )?;

        module.add_command(
            Command::builder("inspect")
                .docs("Shows the session mode and history")
                .modes(["debug"])
                .history(false)
                .param(Param::inject::<SessionHandle>("session"))
                .param(Param::inject::<Arc<dyn Writer>>("writer"))
                .handler(|args: &BoundArgs| {
                    let session = args.require::<SessionHandle>()?;
                    let writer = args.require::<Arc<dyn Writer>>()?;
                    let history = session.history();
                    writer.info(&[&"mode:", &session.mode()]);
                    writer.info(&[&"history:", &history.len()]);
                    Ok(history)
                })
                .build()?,
        )?;

        Ok(module)
    })
}
