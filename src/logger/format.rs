//! Log line formatting.
//!
//! Every line is prefixed with an RFC-1123 UTC timestamp and the server
//! name, and optionally wrapped in an ANSI color for terminal output.

use chrono::{DateTime, Utc};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Color applied to a log line when the target stream is a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
}

impl Color {
    const fn code(self) -> &'static str {
        match self {
            Self::Green => GREEN,
            Self::Red => RED,
        }
    }
}

/// Format a timestamp in the RFC-1123 shape used by HTTP dates:
/// `Mon, 01 Jan 1970 00:00:00 GMT`.
pub fn timestamp(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build a full log line: `[timestamp] [name] message`, colorized when
/// `color` is set.
pub fn line(time: DateTime<Utc>, name: &str, message: &str, color: Option<Color>) -> String {
    let plain = format!("[{}] [{}] {}", timestamp(time), name, message);
    match color {
        Some(c) => format!("{}{}{}", c.code(), plain, RESET),
        None => plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(0, 0).unwrap()
    }

    #[test]
    fn test_timestamp_rfc1123() {
        assert_eq!(timestamp(epoch()), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_line_plain() {
        let formatted = line(epoch(), "my-api", "hello", None);
        assert_eq!(formatted, "[Thu, 01 Jan 1970 00:00:00 GMT] [my-api] hello");
    }

    #[test]
    fn test_line_colored() {
        let formatted = line(epoch(), "my-api", "boom", Some(Color::Red));
        assert!(formatted.starts_with("\x1b[31m["));
        assert!(formatted.ends_with("\x1b[0m"));
        assert!(formatted.contains("[my-api] boom"));
    }
}
