//! Console logger implementation

use super::traits::Logger;

/// A logger that writes every level to stderr
///
/// stdout is reserved for the stdio tool-call protocol, so nothing here prints to it.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            prefix: "[inkbridge]".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn line(&self, level: &str, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        eprintln!("{}", self.line("DEBUG", message));
    }

    fn info(&self, message: &str) {
        eprintln!("{}", self.line("INFO", message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", self.line("WARN", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.line("ERROR", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_prefix() {
        assert_eq!(ConsoleLogger::new().prefix, "[inkbridge]");
        assert_eq!(ConsoleLogger::with_prefix("[worker]").prefix, "[worker]");
    }

    #[test]
    fn test_line_format() {
        let logger = ConsoleLogger::with_prefix("[t]");
        assert_eq!(logger.line("WARN", "telemetry failed"), "[t] WARN: telemetry failed");
    }
}
