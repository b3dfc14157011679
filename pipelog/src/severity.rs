//! Severity levels and allowed-severity sets.
//!
//! Every severity occupies exactly one bit so that an "allowed" set is just the bitwise union of the severities
//! that may be emitted:
//!
//! | Severity | Bit  |
//! |----------|------|
//! | `ERROR`  | `1`  |
//! | `DEBUG`  | `2`  |
//! | `FATAL`  | `4`  |
//! | `INFO`   | `8`  |
//! | `WARN`   | `16` |
//!
//! A value that is not exactly one of these bits (a union such as `ERROR | DEBUG`, or an unknown bit) is still a
//! valid [`Severities`] value: it can be written, filtered and rendered, it just has no name of its own and renders
//! as `Severity(N)`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u32)]
pub enum Severity {
    /// The "error" level.
    ///
    /// Designates very serious errors.
    Error = 1,

    /// The "debug" level.
    ///
    /// Designates lower priority information.
    Debug = 2,

    /// The "fatal" level.
    ///
    /// Designates critical failures. This is a label only, logging at this level never terminates the process.
    Fatal = 4,

    /// The "info" level.
    ///
    /// Designates useful information.
    Info = 8,

    /// The "warn" level.
    ///
    /// Designates hazardous situations.
    Warn = 16,
}

impl Severity {
    /// All severities, in bit order.
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Debug,
        Severity::Fatal,
        Severity::Info,
        Severity::Warn,
    ];

    /// Returns the single bit representing this severity.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Returns the severity whose bit is exactly `bits`.
    ///
    /// Unions and unknown bits return `None`.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Severity::Error),
            2 => Some(Severity::Debug),
            4 => Some(Severity::Fatal),
            8 => Some(Severity::Info),
            16 => Some(Severity::Warn),
            _ => None,
        }
    }

    /// Returns the upper-case name used in rendered lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Debug => "DEBUG",
            Severity::Fatal => "FATAL",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unknown severity name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity `{0}`")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(string.trim()))
            .ok_or_else(|| ParseSeverityError(string.to_owned()))
    }
}

bitflags! {
    /// A set of severities, used both as the "allowed" filter of a logger and as the raw severity of a write.
    ///
    /// Textual (de)serialization uses the flag names joined by `|`, e.g. `"INFO | WARN"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Severities: u32 {
        /// See [`Severity::Error`].
        const ERROR = Severity::Error.bits();
        /// See [`Severity::Debug`].
        const DEBUG = Severity::Debug.bits();
        /// See [`Severity::Fatal`].
        const FATAL = Severity::Fatal.bits();
        /// See [`Severity::Info`].
        const INFO = Severity::Info.bits();
        /// See [`Severity::Warn`].
        const WARN = Severity::Warn.bits();

        /// Every severity.
        const ALL = Self::ERROR.bits()
            | Self::DEBUG.bits()
            | Self::FATAL.bits()
            | Self::INFO.bits()
            | Self::WARN.bits();
    }
}

impl Severities {
    /// Returns the severity if this set is exactly one severity.
    pub const fn single(self) -> Option<Severity> {
        Severity::from_bits(self.bits())
    }
}

impl Default for Severities {
    fn default() -> Self {
        Severities::ALL
    }
}

impl From<Severity> for Severities {
    fn from(severity: Severity) -> Self {
        Severities::from_bits_retain(severity.bits())
    }
}

impl fmt::Display for Severities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.single() {
            Some(severity) => f.write_str(severity.as_str()),
            None => write!(f, "Severity({})", self.bits()),
        }
    }
}

/// Returns the rendered name of a raw severity value.
///
/// The five severities map to their names, any other value to `Severity(N)`.
pub fn name(bits: u32) -> Cow<'static, str> {
    match Severity::from_bits(bits) {
        Some(severity) => Cow::Borrowed(severity.as_str()),
        None => Cow::Owned(format!("Severity({bits})")),
    }
}
