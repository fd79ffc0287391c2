//! SpaceWorld - command framework for interactive consoles
//!
//! SpaceWorld lets a host application register commands in nested modules
//! and dispatch free-text input to them:
//!
//! - **`command`** - command metadata, typed parameters and sync/async handlers
//! - **`module`** - nested command registries and module discovery
//! - **`binder`** - mapping raw tokens onto declared parameters
//! - **`session`** - dispatch with mode gating, confirmation and history
//! - **`writer`** - output abstraction with console and in-memory writers
//! - **`config`** - session settings, loadable from TOML
//! - **`observability`** - `tracing` subscriber setup
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! spaceworld = { version = "0.3", features = ["logging"] }
//! # Or enable everything, including the `spaceworld` binary:
//! spaceworld = { version = "0.3", features = ["all"] }
//! ```
//!
//! # Example
//!
//! ```
//! use spaceworld::prelude::*;
//! use std::sync::Arc;
//!
//! let mut greet = Module::new("greet", "Greetings");
//! greet
//!     .add_command(
//!         Command::builder("hello")
//!             .docs("Say hello")
//!             .param(Param::positional("name", ParamType::Str).with_default("world"))
//!             .param(Param::flag("loud"))
//!             .handler(|args: &BoundArgs| {
//!                 let name: String = args.get("name")?;
//!                 let text = format!("hello {}", name);
//!                 Ok(if args.get("loud")? { text.to_uppercase() } else { text })
//!             })
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let writer = Arc::new(BufferWriter::new());
//! let mut session = Session::new(writer.clone()).with_builtins().unwrap();
//! session.register_module(greet).unwrap();
//!
//! let outcomes = session.execute_blocking("greet hello Ada --loud").unwrap();
//! assert_eq!(outcomes, vec![DispatchOutcome::Executed("HELLO ADA".into())]);
//! ```

#![warn(missing_docs)]

pub mod binder;
pub mod command;
pub mod config;
pub mod error;
pub mod module;
pub mod runtime;
pub mod session;
pub mod writer;

/// Logging setup (enabled with the `logging` feature)
#[cfg(feature = "logging")]
pub mod observability;

pub use binder::{BindingError, BoundArgs, DependencyRegistry};
pub use command::{Command, CommandBuilder, Flag, Param, ParamKind, ParamType};
pub use config::SessionConfig;
pub use error::{Error, RegistrationError, Result};
pub use module::{FactoryProvider, Module, ModuleProvider, StaticProvider};
pub use session::{DispatchOutcome, Session, SessionHandle};
pub use writer::{BufferWriter, Level, Writer};

#[cfg(feature = "console")]
pub use writer::ConsoleWriter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binder::{BoundArgs, DependencyRegistry};
    pub use crate::command::{Command, Flag, Param, ParamType};
    pub use crate::config::SessionConfig;
    pub use crate::error::RegistrationError;
    pub use crate::module::{Module, ModuleProvider};
    pub use crate::session::{DispatchOutcome, Session, SessionHandle};
    pub use crate::writer::{BufferWriter, Writer};

    #[cfg(feature = "console")]
    pub use crate::writer::ConsoleWriter;
}
