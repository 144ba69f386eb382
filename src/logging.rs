// src/logging.rs

//! Structured logging for the admin client
//!
//! Installs a `tracing` subscriber with an env-driven filter, a console
//! layer on stderr and an optional daily-rolling file layer. Components log
//! through [`Logger`], which stamps every event with the component name and
//! an optional correlation id.

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};
use crate::types::CorrelationId;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Owns the subscriber setup and keeps the non-blocking file writer alive
#[derive(Debug)]
pub struct LoggingManager {
    config: LoggingConfig,
    _guards: Vec<WorkerGuard>,
    initialized: bool,
}

impl LoggingManager {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            _guards: Vec::new(),
            initialized: false,
        }
    }

    /// Overrides the configured level, e.g. from `--verbose`
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level.as_filter().to_string();
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Installs the global subscriber. `RUST_LOG` wins over the configured level.
    pub fn initialize(&mut self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.config.level))
            .map_err(|e| Error::config(format!("Invalid log level '{}': {}", self.config.level, e)))?;

        let console = self
            .config
            .console
            .enabled
            .then(|| format_layer(self.config.format, self.config.console.colored, std::io::stderr));

        let file = match &self.config.file {
            Some(file_config) => {
                let (directory, file_name) = split_log_path(&file_config.path);
                std::fs::create_dir_all(directory).map_err(|e| {
                    Error::config(format!(
                        "Failed to create log directory {}: {}",
                        directory.display(),
                        e
                    ))
                })?;

                let appender = tracing_appender::rolling::daily(directory, file_name);
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                self._guards.push(guard);
                Some(format_layer(self.config.format, false, non_blocking))
            }
            None => None,
        };

        Registry::default()
            .with(filter)
            .with(console)
            .with(file)
            .try_init()
            .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))?;

        self.initialized = true;
        tracing::debug!(level = %self.config.level, "logging initialized");
        Ok(())
    }
}

fn split_log_path(path: &Path) -> (&Path, &std::ffi::OsStr) {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("admin.log"));
    (directory, file_name)
}

fn format_layer<S, W>(format: LogFormat, ansi: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    }
}

/// Component-specific logger with context
#[derive(Debug, Clone)]
pub struct Logger {
    component: String,
    correlation_id: Option<CorrelationId>,
}

impl Logger {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            correlation_id: None,
        }
    }

    /// Set correlation ID for all logs from this logger
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Fresh correlation id for one operation
    pub fn scoped(&self) -> Self {
        self.clone().with_correlation_id(CorrelationId::new_v4())
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn correlation_id(&self) -> Option<CorrelationId> {
        self.correlation_id
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    fn log(&self, level: LogLevel, message: &str) {
        let component = self.component.as_str();
        let correlation_id = self.correlation_id.map(|id| id.to_string()).unwrap_or_default();

        match level {
            LogLevel::Trace => tracing::trace!(component, correlation_id = %correlation_id, "{}", message),
            LogLevel::Debug => tracing::debug!(component, correlation_id = %correlation_id, "{}", message),
            LogLevel::Info => tracing::info!(component, correlation_id = %correlation_id, "{}", message),
            LogLevel::Warn => tracing::warn!(component, correlation_id = %correlation_id, "{}", message),
            LogLevel::Error => tracing::error!(component, correlation_id = %correlation_id, "{}", message),
        }
    }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_with_context() {
        let logger = Logger::new("orders_screen");
        assert!(logger.correlation_id().is_none());

        let scoped = logger.scoped();
        assert_eq!(scoped.component(), "orders_screen");
        assert!(scoped.correlation_id().is_some());

        // no subscriber installed: these must be no-ops
        scoped.info("Order list reloaded");
        log_warn!(scoped, "status {} rejected", "SHIPPED");
    }

    #[test]
    fn test_level_override() {
        let manager = LoggingManager::new(LoggingConfig::default()).with_level(LogLevel::Debug);
        assert_eq!(manager.config.level, "debug");
        assert!(!manager.is_initialized());
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("admin.log"));
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "admin.log");

        let (dir, name) = split_log_path(Path::new("/var/log/storefront/admin.log"));
        assert_eq!(dir, Path::new("/var/log/storefront"));
        assert_eq!(name, "admin.log");
    }
}
