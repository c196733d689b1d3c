//! Diagnostic logging for the CLI.
//!
//! Library code only emits `tracing` events; the binary decides where they go.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Whether to include file/line info.
    pub include_location: bool,
    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            include_location: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Verbose output selected by `--debug`.
    pub fn debug() -> Self {
        Self {
            level: Level::DEBUG,
            include_location: true,
            include_target: true,
        }
    }

    pub fn from_debug_flag(debug: bool) -> Self {
        if debug { Self::debug() } else { Self::default() }
    }

    /// Filter directive applied when `RUST_LOG` is absent.
    pub fn default_directive(&self) -> String {
        format!("tooldebt={}", self.level.as_str().to_lowercase())
    }
}

/// Initializes the logging system with the given configuration.
///
/// Events go to stderr so command output on stdout stays clean.
pub fn init_logging_with_config(config: LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    // Ignore a subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(LoggingConfig::default().default_directive(), "tooldebt=warn");
        assert_eq!(LoggingConfig::from_debug_flag(true).default_directive(), "tooldebt=debug");
        assert_eq!(LoggingConfig::from_debug_flag(false).level, Level::WARN);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging_with_config(LoggingConfig::default());
        init_logging_with_config(LoggingConfig::debug());
    }
}
