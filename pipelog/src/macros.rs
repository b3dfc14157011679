//! Logging macros.
//!
//! The macros concatenate their message parts with no separator, each part rendered with its
//! [`Display`][core::fmt::Display] implementation, and capture the full call site including the path of the enclosing
//! function.
//!
//! - `log!`: Logs at a given severity
//! - `debug!`, `info!`, `warn!`, `error!`, `fatal!`: Log at a fixed severity
//!
//! Every macro logs through the [default logger][crate::default_logger] unless a `logger: <expr>,` prefix names
//! another one.

/// Captures the [`CallSite`][crate::CallSite] of the invocation, including the enclosing function path.
///
/// # Examples
///
/// ```rust
/// fn handler() -> pipelog::CallSite {
///     pipelog::call_site!()
/// }
///
/// let call_site = handler();
/// assert!(call_site.function.ends_with("::handler"));
/// assert!(call_site.line > 0);
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new($crate::function_path!(), ::core::file!(), ::core::line!())
    };
}

/// Expands to the fully-qualified path of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! function_path {
    () => {{
        fn __f() {}
        $crate::macro_helpers::strip_function_path(::core::any::type_name_of_val(&__f))
    }};
}

/// Logs a message with the specified severity.
///
/// This is the base logging macro that the severity-specific macros build upon.
///
/// # Examples
///
/// Log through the default logger:
/// ```rust
/// use pipelog::{Severity, log};
///
/// log!(Severity::Info, "Application started");
/// ```
///
/// Log through a specific logger, concatenating the message parts:
/// ```rust
/// use pipelog::sink::MemorySink;
/// use pipelog::{Logger, Severity, log};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().output(sink.clone()).color(false).build();
///
/// let port = 8080;
/// log!(logger: &logger, Severity::Info, "Listening on port ", port);
///
/// assert!(sink.contents().ends_with("|Listening on port 8080\n"));
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $severity:expr $(, $part:expr)* $(,)?) => {
        ($logger).write(
            $severity,
            $crate::call_site!(),
            &$crate::macro_helpers::Concat(&[$(&$part as &dyn ::core::fmt::Display),*]),
        )
    };
    ($severity:expr $(, $part:expr)* $(,)?) => {
        $crate::log!(logger: $crate::default_logger(), $severity $(, $part)*)
    };
}

/// Logs a debug-level message.
///
/// # Examples
///
/// ```rust
/// use pipelog::debug;
///
/// let user_id = 456;
/// debug!("Processing request for user ", user_id);
/// ```
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Severity::Debug $(, $part)*)
    };
    ($($part:expr),* $(,)?) => {
        $crate::log!($crate::Severity::Debug $(, $part)*)
    };
}

/// Logs an info-level message.
///
/// # Examples
///
/// ```rust
/// use pipelog::info;
///
/// info!("Service started");
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Severity::Info $(, $part)*)
    };
    ($($part:expr),* $(,)?) => {
        $crate::log!($crate::Severity::Info $(, $part)*)
    };
}

/// Logs a warning message.
///
/// # Examples
///
/// ```rust
/// use pipelog::warn;
///
/// let usage = 85;
/// warn!("High memory usage: ", usage, "%");
/// ```
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Severity::Warn $(, $part)*)
    };
    ($($part:expr),* $(,)?) => {
        $crate::log!($crate::Severity::Warn $(, $part)*)
    };
}

/// Logs an error message.
///
/// # Examples
///
/// ```rust
/// use pipelog::error;
///
/// let code = 500;
/// error!("Request failed with ", code);
/// ```
#[macro_export]
macro_rules! error {
    (logger: $logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Severity::Error $(, $part)*)
    };
    ($($part:expr),* $(,)?) => {
        $crate::log!($crate::Severity::Error $(, $part)*)
    };
}

/// Logs a fatal message.
///
/// This only sets the severity; unlike comparable libraries the process is not terminated.
///
/// # Examples
///
/// ```rust
/// use pipelog::fatal;
///
/// fatal!("Configuration store unreachable");
/// // Still running.
/// ```
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!(logger: $logger, $crate::Severity::Fatal $(, $part)*)
    };
    ($($part:expr),* $(,)?) => {
        $crate::log!($crate::Severity::Fatal $(, $part)*)
    };
}
