//! Logger module
//!
//! Provides the process logger: info lines to stdout (green), error lines
//! to stderr (red), each prefixed with an RFC-1123 UTC timestamp and the
//! configured server name. The logger is constructed once at startup and
//! injected through `AppState` rather than installed globally.

mod format;

pub use format::Color;

use chrono::Utc;
use std::io::IsTerminal;

/// Timestamping, name-prefixing logger.
///
/// Cheap to clone; carries only the server name and the per-stream color
/// decisions made at construction time.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    color_stdout: bool,
    color_stderr: bool,
}

impl Logger {
    /// Create a logger for the given server name.
    ///
    /// Colors are enabled per stream only when that stream is a terminal.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color_stdout: std::io::stdout().is_terminal(),
            color_stderr: std::io::stderr().is_terminal(),
        }
    }

    /// Create a logger with colors forced off, for test output.
    #[cfg(test)]
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color_stdout: false,
            color_stderr: false,
        }
    }

    /// Write an informational line to stdout.
    pub fn info(&self, message: &str) {
        let color = self.color_stdout.then_some(Color::Green);
        println!("{}", format::line(Utc::now(), &self.name, message, color));
    }

    /// Write an error line to stderr.
    pub fn error(&self, message: &str) {
        let color = self.color_stderr.then_some(Color::Red);
        eprintln!("{}", format::line(Utc::now(), &self.name, message, color));
    }
}
