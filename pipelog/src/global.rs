//! The process-wide default logger and the free functions delegating to it.
//!
//! Libraries should prefer taking a [`Logger`] from their caller. The default exists for binaries that want logging
//! without any setup, and is meant to be configured once at the composition root:
//!
//! ```rust,no_run
//! use pipelog::{Config, Logger};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! pipelog::set_default(Logger::builder().config(&config).build())?;
//!
//! pipelog::info!("Listening on ", "0.0.0.0:9000");
//! pipelog::flush();
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::OnceLock;

use crate::caller::CallSite;
use crate::config::Config;
use crate::logger::Logger;
use crate::severity::{Severities, Severity};

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// Installs `logger` as the default logger.
///
/// This can only happen once per process and only before the default logger is first used.
pub fn set_default(logger: Logger) -> Result<(), SetDefaultError> {
    DEFAULT.set(logger).map_err(|_| SetDefaultError(()))
}

/// Returns the default logger.
///
/// If none was installed with [`set_default`], one is created on first use from [`Config::from_env`] writing to
/// buffered stdout. An invalid environment falls back to the default configuration.
pub fn default_logger() -> &'static Logger {
    DEFAULT.get_or_init(|| {
        let config = Config::from_env().unwrap_or_default();
        Logger::builder().config(&config).build()
    })
}

/// The type returned by [`set_default`] if the default logger has already been set or used.
#[derive(Debug)]
pub struct SetDefaultError(());

impl SetDefaultError {
    const MESSAGE: &'static str = "a default logger has already been set";
}

impl fmt::Display for SetDefaultError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(Self::MESSAGE)
    }
}

impl std::error::Error for SetDefaultError {}

/// Replaces the sink of the default logger.
pub fn set_output(sink: impl std::io::Write + Send + 'static) {
    default_logger().set_output(sink);
}

/// Replaces the allowed severities of the default logger.
pub fn set_allowed_severities(allowed: Severities) {
    default_logger().set_allowed_severities(allowed);
}

/// Flushes the sink of the default logger.
pub fn flush() {
    default_logger().flush();
}

/// Writes one line at `severity` through the default logger.
#[track_caller]
pub fn log(severity: impl Into<Severities>, message: impl fmt::Display) {
    default_logger().write(severity, CallSite::caller(), &message);
}

/// Writes one line at [`Severity::Debug`] through the default logger.
#[track_caller]
pub fn debug(message: impl fmt::Display) {
    log(Severity::Debug, message);
}

/// Writes one line at [`Severity::Info`] through the default logger.
#[track_caller]
pub fn info(message: impl fmt::Display) {
    log(Severity::Info, message);
}

/// Writes one line at [`Severity::Warn`] through the default logger.
#[track_caller]
pub fn warn(message: impl fmt::Display) {
    log(Severity::Warn, message);
}

/// Writes one line at [`Severity::Error`] through the default logger.
#[track_caller]
pub fn error(message: impl fmt::Display) {
    log(Severity::Error, message);
}

/// Writes one line at [`Severity::Fatal`] through the default logger.
///
/// The process keeps running.
#[track_caller]
pub fn fatal(message: impl fmt::Display) {
    log(Severity::Fatal, message);
}
