//! Commands: metadata, parameters and handlers.
//!
//! A [`Command`] pairs a handler with everything the dispatcher needs to
//! decide whether and how to run it: activation modes, deprecation and
//! confirmation settings, history inclusion and the declared parameters.
//!
//! # Example
//!
//! ```
//! use spaceworld::command::{Command, Param, ParamType};
//! use spaceworld::BoundArgs;
//!
//! let command = Command::builder("add")
//!     .docs("Add two numbers")
//!     .param(Param::positional("a", ParamType::Int))
//!     .param(Param::positional("b", ParamType::Int))
//!     .handler(|args: &BoundArgs| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(command.example_text(), "add [a: int] [b: int]");
//! ```

mod definition;
mod handler;
mod help;
mod param;

pub use definition::{Command, CommandBuilder, Flag, DEFAULT_MODE};
pub use handler::{CommandHandler, CommandResult};
pub use param::{Param, ParamKind, ParamType};
