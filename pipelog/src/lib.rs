//! # `pipelog`
//!
//! A minimal, embeddable logging library writing severity-filtered, pipe-delimited lines to any [`std::io::Write`]
//! sink.
//!
//! ## Line Format
//!
//! ```text
//! SEVERITY|HH:MM:SS.ffffff|PID|FILE|FUNCTION|LINE|MESSAGE
//! ```
//!
//! e.g. `DEBUG|17:50:22.615673|1234|server/handler.rs|server::handler::index|24|Incoming request from /`.
//! The process id and the call-site fields can be turned off, and lines can be colored by severity.
//!
//! ## Features
//!
//! - **Severity filtering**: Five bit-flag severities, any union of them can be allowed
//! - **Thread safety**: Concurrent writers never interleave within a line
//! - **Call sites**: File, function and line of the logging call, without wrapper frames
//! - **Pluggable**: Sink, clock and call-site resolution are injected at construction
//!
//! ## Feature Flags
//!
//! - `log` - Forward records of the [`log`](https://docs.rs/log) facade into a [`Logger`]
//!
//! ## Basic Usage
//!
//! Build a logger at the composition root and hand it to the code that needs it:
//!
//! ```rust
//! use pipelog::sink::MemorySink;
//! use pipelog::{Logger, Severities, info, warn};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .output(sink.clone())
//!     .allowed(Severities::INFO | Severities::WARN)
//!     .color(false)
//!     .build();
//!
//! info!(logger: &logger, "Listening on ", "0.0.0.0:9000");
//! warn!(logger: &logger, "Slow request: ", 1250, "ms");
//!
//! assert_eq!(sink.contents().lines().count(), 2);
//! ```
//!
//! Or use the process-wide default, configured from the environment on first use:
//!
//! ```rust
//! pipelog::info!("Service started");
//! pipelog::flush();
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod caller;
pub mod clock;
pub mod color;
mod config;
pub mod format;
mod global;
#[cfg(feature = "log")]
mod log_bridge;
mod logger;
#[doc(hidden)]
pub mod macro_helpers;
mod macros;
pub mod severity;
pub mod sink;

pub use caller::CallSite;
pub use config::{Config, ConfigError, NO_COLOR_VAR, SEVERITIES_VAR};
pub use global::{
    SetDefaultError, debug, default_logger, error, fatal, flush, info, log, set_allowed_severities,
    set_default, set_output, warn,
};
#[cfg(feature = "log")]
pub use log_bridge::{init_log_bridge, severity as log_severity};
pub use logger::{Builder, Logger};
pub use severity::{ParseSeverityError, Severities, Severity};
