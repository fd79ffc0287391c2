//! Colored console writer.

use super::{join_parts, Writer};
use colored::*;
use std::fmt::Display;
use std::io::Write as _;

/// Writer printing to the terminal with colored level prefixes.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleWriter {
    colored: bool,
}

impl ConsoleWriter {
    /// Colored output.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Output without ANSI colors, e.g. when stdout is not a terminal.
    pub fn plain() -> Self {
        Self { colored: false }
    }

    fn prefix(&self, label: &str, color: Color) -> String {
        if self.colored {
            label.color(color).bold().to_string()
        } else {
            label.to_string()
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for ConsoleWriter {
    fn write(&self, parts: &[&dyn Display]) {
        println!("{}", join_parts(parts));
    }

    fn info(&self, parts: &[&dyn Display]) {
        println!("{} {}", self.prefix("INFO:", Color::Blue), join_parts(parts));
    }

    fn warning(&self, parts: &[&dyn Display]) {
        println!("{} {}", self.prefix("WARNING:", Color::Yellow), join_parts(parts));
    }

    fn error(&self, parts: &[&dyn Display]) {
        eprintln!("{} {}", self.prefix("ERROR:", Color::Red), join_parts(parts));
    }

    fn input_info(&self, parts: &[&dyn Display]) {
        print!("{} {} ", self.prefix("INPUT:", Color::Cyan), join_parts(parts));
        let _ = std::io::stdout().flush();
    }
}
