//! The [`Logger`] and its [`Builder`].

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::caller::{CallSite, ResolveFn, resolve_captured};
use crate::clock::{ClockFn, system_now};
use crate::color::ColorAnnotator;
use crate::config::Config;
use crate::format::{Fields, LineFormat, Record};
use crate::severity::{Severities, Severity};
use crate::sink::{BoxedSink, buffered_stdout};

/// A severity-filtered writer of delimited log lines.
///
/// Every emitted line is rendered completely before it is handed to the sink with a single write while holding the
/// sink lock, so concurrent writers never interleave within a line. The allowed severities are kept in an atomic and
/// can be changed at any time without blocking writers; a write whose severity is not allowed neither locks nor
/// performs any I/O.
///
/// Write failures reported by the sink are discarded: logging never fails the caller.
///
/// # Examples
///
/// ```rust
/// use pipelog::sink::MemorySink;
/// use pipelog::{Logger, Severities};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .output(sink.clone())
///     .allowed(Severities::INFO | Severities::WARN)
///     .color(false)
///     .build();
///
/// logger.debug("dropped");
/// logger.warn("kept");
///
/// assert!(sink.contents().starts_with("WARN|"));
/// assert_eq!(sink.contents().lines().count(), 1);
/// ```
pub struct Logger {
    allowed: AtomicU32,
    sink: Mutex<BoxedSink>,
    format: LineFormat,
    color: ColorAnnotator,
    process_id: u32,
    now_fn: ClockFn,
    resolve_fn: ResolveFn,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("allowed", &self.allowed_severities())
            .field("format", &self.format)
            .field("color", &self.color)
            .field("process_id", &self.process_id)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Creates a new logger builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a logger writing to `sink` with the default configuration.
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self::builder().output(sink).build()
    }

    /// Replaces the sink.
    ///
    /// The previous sink is flushed before it is dropped; errors doing so are ignored.
    pub fn set_output(&self, sink: impl Write + Send + 'static) {
        let previous = std::mem::replace(&mut *self.lock_sink(), Box::new(sink));
        flush_discarding(previous);
    }

    /// Replaces the set of allowed severities.
    pub fn set_allowed_severities(&self, allowed: Severities) {
        self.allowed.store(allowed.bits(), Ordering::Relaxed);
    }

    /// Returns the set of allowed severities.
    pub fn allowed_severities(&self) -> Severities {
        Severities::from_bits_retain(self.allowed.load(Ordering::Relaxed))
    }

    /// Returns whether a write at `severity` would be emitted.
    ///
    /// This is the case if at least one bit of `severity` is allowed.
    pub fn enabled(&self, severity: impl Into<Severities>) -> bool {
        severity.into().intersects(self.allowed_severities())
    }

    /// Returns the process id rendered into lines.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Writes one line at `severity` if it is allowed.
    ///
    /// `severity` is used as given, a union of severities is filtered and rendered as that union rather than split
    /// up. Prefer the logging macros, which capture `call_site` including the function path.
    pub fn write(
        &self,
        severity: impl Into<Severities>,
        call_site: CallSite,
        message: &dyn fmt::Display,
    ) {
        let severity = severity.into();
        if !severity.intersects(self.allowed_severities()) {
            return;
        }

        let record = Record {
            severity,
            time: (self.now_fn)(),
            process_id: self.process_id,
            call_site: (self.resolve_fn)(call_site),
            message,
        };

        // Rendering happens outside the lock, so a message that logs while being rendered can not deadlock.
        let mut line = String::new();
        self.format.write_line(&record, &self.color, &mut line);

        // This is a logger, ignore any errors writing.
        let _ = self.lock_sink().write_all(line.as_bytes());
    }

    /// Writes one line at `severity`, attributed to the caller's location.
    #[track_caller]
    pub fn log(&self, severity: impl Into<Severities>, message: impl fmt::Display) {
        self.write(severity, CallSite::caller(), &message);
    }

    /// Writes one line at [`Severity::Debug`].
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    /// Writes one line at [`Severity::Info`].
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    /// Writes one line at [`Severity::Warn`].
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Severity::Warn, message);
    }

    /// Writes one line at [`Severity::Error`].
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    /// Writes one line at [`Severity::Fatal`].
    ///
    /// Only the severity differs from the other levels; the process keeps running.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Severity::Fatal, message);
    }

    /// Flushes the sink, ignoring errors.
    pub fn flush(&self) {
        let _ = self.lock_sink().flush();
    }

    fn lock_sink(&self) -> MutexGuard<'_, BoxedSink> {
        // A panic while holding the lock can only happen inside the sink, whose state is its own concern.
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn flush_discarding(mut sink: BoxedSink) {
    let _ = sink.flush();
}

/// Builder for [`Logger`]s.
///
/// Every setting has a default: buffered stdout, all severities, colored lines with every field, the system clock,
/// the current process id and the captured call site.
#[derive(Debug)]
#[must_use]
pub struct Builder {
    sink: Option<BoxedSinkDebug>,
    allowed: Severities,
    format: LineFormat,
    color: ColorAnnotator,
    process_id: u32,
    now_fn: ClockFn,
    resolve_fn: ResolveFn,
}

/// Wraps the boxed sink so the builder can derive `Debug`.
struct BoxedSinkDebug(BoxedSink);

impl fmt::Debug for BoxedSinkDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedSink")
    }
}

impl Builder {
    fn new() -> Self {
        Self {
            sink: None,
            allowed: Severities::ALL,
            format: LineFormat::default(),
            color: ColorAnnotator::default(),
            process_id: std::process::id(),
            now_fn: system_now,
            resolve_fn: resolve_captured,
        }
    }

    /// Applies everything described by `config`.
    pub fn config(self, config: &Config) -> Self {
        Self {
            allowed: config.allowed,
            format: config.line_format(),
            color: config.color_annotator(),
            ..self
        }
    }

    /// Sets the sink lines are written to.
    pub fn output(self, sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Some(BoxedSinkDebug(Box::new(sink))),
            ..self
        }
    }

    /// Sets the severities that are emitted.
    pub fn allowed(self, allowed: Severities) -> Self {
        Self { allowed, ..self }
    }

    /// Enables or disables coloring, keeping the color scope.
    pub fn color(self, enabled: bool) -> Self {
        Self {
            color: ColorAnnotator::new(enabled, self.color.scope()),
            ..self
        }
    }

    /// Sets the color annotator.
    pub fn color_annotator(self, color: ColorAnnotator) -> Self {
        Self { color, ..self }
    }

    /// Sets the optional fields that are rendered.
    pub fn fields(self, fields: Fields) -> Self {
        Self {
            format: LineFormat::new(fields, self.format.source_root().to_owned()),
            ..self
        }
    }

    /// Sets the line format.
    pub fn line_format(self, format: LineFormat) -> Self {
        Self { format, ..self }
    }

    /// Sets the process id rendered into lines.
    pub fn process_id(self, process_id: u32) -> Self {
        Self { process_id, ..self }
    }

    /// Sets the clock lines are timestamped with.
    pub fn clock(self, now_fn: ClockFn) -> Self {
        Self { now_fn, ..self }
    }

    /// Sets the function mapping captured call sites onto reported ones.
    pub fn caller_resolver(self, resolve_fn: ResolveFn) -> Self {
        Self { resolve_fn, ..self }
    }

    /// Builds the logger.
    pub fn build(self) -> Logger {
        let sink = match self.sink {
            Some(BoxedSinkDebug(sink)) => sink,
            None => Box::new(buffered_stdout()),
        };

        Logger {
            allowed: AtomicU32::new(self.allowed.bits()),
            sink: Mutex::new(sink),
            format: self.format,
            color: self.color,
            process_id: self.process_id,
            now_fn: self.now_fn,
            resolve_fn: self.resolve_fn,
        }
    }
}
