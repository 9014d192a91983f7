//! Logging configuration for EzDB
//!
//! The library itself only emits `tracing` events. Applications that want to
//! see them can install a subscriber with [`LogConfig::init`], writing to
//! stdout, a daily-rotated file, or both.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name used when the configured log path has none
const DEFAULT_LOG_FILE: &str = "ezdb.log";

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a file with daily rotation
    File(PathBuf),
    /// Output to both stdout and file
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level filter (an `EnvFilter` directive such as `"ezdb=debug"`)
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    /// Create config with info level and stdout output
    pub fn info() -> Self {
        Self::default()
    }

    /// Create config with debug level
    pub fn debug() -> Self {
        Self::default().with_level("debug")
    }

    /// Create config with warn level
    pub fn warn() -> Self {
        Self::default().with_level("warn")
    }

    /// Set log output to a daily-rotated file
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log output to both stdout and file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Build the filter: `RUST_LOG` wins, then the configured level, then `info`.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Initialize global logging with this configuration
    ///
    /// Returns a guard that must be kept alive while file logging is in use;
    /// dropping it flushes and stops the background writer. If a global
    /// subscriber is already installed this is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use ezdb::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().with_file("./logs/ezdb.log").init();
    /// ```
    pub fn init(self) -> Option<WorkerGuard> {
        let env_filter = self.env_filter();

        match self.output {
            LogOutput::Stdout => {
                let result = match self.format {
                    LogFormat::Pretty => tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().pretty())
                        .try_init(),
                    LogFormat::Compact => tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().compact())
                        .try_init(),
                };
                if result.is_err() {
                    tracing::debug!("Global subscriber already installed");
                }
                None
            }
            LogOutput::File(path) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(&path));

                let result = match self.format {
                    LogFormat::Pretty => tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(non_blocking).pretty())
                        .try_init(),
                    LogFormat::Compact => tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(non_blocking).compact())
                        .try_init(),
                };
                if result.is_err() {
                    tracing::debug!("Global subscriber already installed");
                }
                Some(guard)
            }
            LogOutput::Both(path) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(&path));

                // One format for both sinks; per-sink formats would need boxed layers.
                let result = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer())
                    .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                    .try_init();
                if result.is_err() {
                    tracing::debug!("Global subscriber already installed");
                }
                Some(guard)
            }
        }
    }
}

fn file_appender(path: &Path) -> tracing_appender::rolling::RollingFileAppender {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);
    tracing_appender::rolling::daily(dir, file_name)
}
