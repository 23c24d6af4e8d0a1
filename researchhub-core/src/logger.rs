//! Reporting hook for recoverable problems.
//!
//! Most of the crate logs through `tracing` directly. Components that must
//! report a problem without failing the caller (the session store when the
//! credential cannot be persisted) take an injected [`Logger`] instead, so an
//! embedding application can route those reports to its own UI.

use std::sync::Arc;

/// Trait representing a logger that can log messages at various levels.
///
/// # Examples
///
/// Implementing the `Logger` trait:
///
/// ```rust
/// use researchhub_core::logger::{Logger, LogLevel};
///
/// struct MyLogger;
///
/// impl Logger for MyLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         println!("[{:?}] {}", level, message);
///     }
/// }
/// ```
pub trait Logger: Sync + Send {
    /// Logs a message at the specified log level.
    ///
    /// # Arguments
    ///
    /// * `level` - The severity level of the log message.
    /// * `message` - The log message to be recorded.
    fn log(&self, level: LogLevel, message: String);
}

/// Enumeration of possible log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Designates very low priority, often extremely detailed messages.
    Trace,
    /// Designates lower priority debugging information.
    Debug,
    /// Designates informational messages that highlight the progress of the application.
    Info,
    /// Designates potentially harmful situations.
    Warn,
    /// Designates error events that might still allow the application to continue running.
    Error,
}

/// Forwards every message to the `tracing` subscriber of the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "researchhub", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "researchhub", "{message}"),
            LogLevel::Info => tracing::info!(target: "researchhub", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "researchhub", "{message}"),
            LogLevel::Error => tracing::error!(target: "researchhub", "{message}"),
        }
    }
}

/// Returns the default logger.
#[must_use]
pub fn default_logger() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}
