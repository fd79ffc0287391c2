//! Output abstraction used by the dispatcher and built-in commands.
//!
//! Every method takes a slice of displayable parts joined with a single
//! space, so callers can mix strings, errors and numbers without
//! formatting them first. Writers never fail.

#[cfg(feature = "console")]
mod console;

#[cfg(feature = "console")]
pub use console::ConsoleWriter;

use parking_lot::Mutex;
use std::fmt::Display;

/// Sink for user-facing output.
pub trait Writer: Send + Sync {
    /// Plain output.
    fn write(&self, parts: &[&dyn Display]);

    /// Informational message.
    fn info(&self, parts: &[&dyn Display]);

    /// Warning.
    fn warning(&self, parts: &[&dyn Display]);

    /// Error.
    fn error(&self, parts: &[&dyn Display]);

    /// Prompt asking the user for input.
    fn input_info(&self, parts: &[&dyn Display]);
}

/// Join parts with a single space.
pub fn join_parts(parts: &[&dyn Display]) -> String {
    parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Kind of a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// From [`Writer::write`].
    Write,
    /// From [`Writer::info`].
    Info,
    /// From [`Writer::warning`].
    Warning,
    /// From [`Writer::error`].
    Error,
    /// From [`Writer::input_info`].
    Input,
}

/// Writer that records everything in memory.
///
/// Handy for tests and for hosts that render output themselves.
#[derive(Debug, Default)]
pub struct BufferWriter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl BufferWriter {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, parts: &[&dyn Display]) {
        self.lines.lock().push((level, join_parts(parts)));
    }

    /// Every recorded line, oldest first.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().clone()
    }

    /// Recorded text at one level.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|(_, text)| text.contains(needle))
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Writer for BufferWriter {
    fn write(&self, parts: &[&dyn Display]) {
        self.push(Level::Write, parts);
    }

    fn info(&self, parts: &[&dyn Display]) {
        self.push(Level::Info, parts);
    }

    fn warning(&self, parts: &[&dyn Display]) {
        self.push(Level::Warning, parts);
    }

    fn error(&self, parts: &[&dyn Display]) {
        self.push(Level::Error, parts);
    }

    fn input_info(&self, parts: &[&dyn Display]) {
        self.push(Level::Input, parts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_parts() {
        assert_eq!(join_parts(&[&"a", &1, &'c']), "a 1 c");
        assert_eq!(join_parts(&[]), "");
    }

    #[test]
    fn test_buffer_records_levels() {
        let buffer = BufferWriter::new();
        buffer.write(&[&"plain"]);
        buffer.error(&[&"Wrong command:", &"x"]);
        buffer.input_info(&[&"sure? (y/n)"]);

        assert_eq!(
            buffer.lines(),
            vec![
                (Level::Write, "plain".to_string()),
                (Level::Error, "Wrong command: x".to_string()),
                (Level::Input, "sure? (y/n)".to_string()),
            ]
        );
        assert_eq!(buffer.messages(Level::Error), vec!["Wrong command: x"]);
        assert!(buffer.contains("sure?"));

        buffer.clear();
        assert!(buffer.lines().is_empty());
    }
}
