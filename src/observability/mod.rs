//! Logging setup for hosts embedding the framework.
//!
//! The library itself only emits `tracing` events; hosts decide where they
//! go. This module offers a stderr subscriber filtered by the
//! `SPACEWORLD_LOG` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use spaceworld::observability::init_logging;
//!
//! // SPACEWORLD_LOG overrides the level given here.
//! init_logging("info");
//! ```

pub mod logging;

pub use logging::{init_logging, init_logging_from_env, LOG_ENV};
