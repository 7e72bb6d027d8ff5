//! Structured logging setup (§11): `tracing` subscribers for stdout and,
//! optionally, a daily-rotating log file.

use ragcore_domain::error::{Error, Result};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Output format for the stdout log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text, suitable for a local terminal.
    Pretty,
    /// Newline-delimited JSON, suitable for log aggregation.
    Json,
}

/// Initialize global `tracing` subscribers.
///
/// `level` is parsed with [`parse_log_level`]; `RAGCORE_LOG` in the
/// environment overrides it if set. `log_dir`, if given, adds a
/// daily-rotating file layer alongside stdout.
pub fn init_logging(level: &str, format: LogFormat, log_dir: Option<&std::path::Path>) -> Result<()> {
    let _ = parse_log_level(level)?;
    let filter = EnvFilter::try_from_env("RAGCORE_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let registry = Registry::default().with(filter);
    let file_appender = log_dir.map(|dir| tracing_appender::rolling::daily(dir, "ragcore.log"));

    match format {
        LogFormat::Json => {
            let stdout = fmt::layer().json().with_target(true).with_line_number(true);
            if let Some(appender) = file_appender {
                let file = fmt::layer().json().with_writer(appender).with_ansi(false);
                registry.with(stdout).with(file).init();
            } else {
                registry.with(stdout).init();
            }
        }
        LogFormat::Pretty => {
            let stdout = fmt::layer().with_target(true).with_line_number(true);
            if let Some(appender) = file_appender {
                let file = fmt::layer().with_writer(appender).with_ansi(false);
                registry.with(stdout).with(file).init();
            } else {
                registry.with(stdout).init();
            }
        }
    }

    tracing::info!(level, "logging initialized");
    Ok(())
}

/// Parse a log level string, defaulting to an error for anything unknown.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(Error::config(format!(
            "invalid log level '{other}': use trace, debug, info, warn, or error"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse_log_level("verbose").is_err());
    }
}
