//! Terminal colors for rendered lines.

use std::fmt::Write;

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::severity::{Severities, Severity};

const RESET: &str = "\x1b[0m";

/// What part of a line is wrapped in the color escape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScope {
    /// The whole line, excluding the terminating newline.
    #[default]
    Line,
    /// Only the severity name.
    Severity,
}

/// Wraps rendered lines in terminal color escapes depending on their severity.
///
/// The escapes are written unconditionally when enabled; no terminal detection or global `colored` override is
/// consulted, the decision is made once when the annotator is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAnnotator {
    enabled: bool,
    scope: ColorScope,
}

impl ColorAnnotator {
    /// An annotator that never colors.
    pub const DISABLED: Self = Self::new(false, ColorScope::Line);

    /// Creates a new annotator.
    pub const fn new(enabled: bool, scope: ColorScope) -> Self {
        Self { enabled, scope }
    }

    /// Returns whether any coloring happens.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the configured scope.
    pub const fn scope(&self) -> ColorScope {
        self.scope
    }

    /// Returns the color a severity is rendered in.
    ///
    /// Only the five severities are colored; unions and unknown values are not.
    pub fn color(severity: Severities) -> Option<Color> {
        match severity.single()? {
            Severity::Error | Severity::Fatal | Severity::Debug => Some(Color::Red),
            Severity::Info => Some(Color::Green),
            Severity::Warn => Some(Color::Yellow),
        }
    }

    /// Returns the color to apply for `severity` within `scope`, if any.
    pub(crate) fn color_for(&self, severity: Severities, scope: ColorScope) -> Option<Color> {
        if self.enabled && self.scope == scope {
            Self::color(severity)
        } else {
            None
        }
    }

    /// Appends `text` to `output`, wrapped in `color` if one is given.
    pub(crate) fn paint(color: Option<Color>, text: &str, output: &mut String) {
        match color {
            Some(color) => {
                // Writing into a `String` can not fail.
                let _ = write!(output, "\x1b[{}m{text}{RESET}", color.to_fg_str());
            }
            None => output.push_str(text),
        }
    }
}

impl Default for ColorAnnotator {
    fn default() -> Self {
        Self::new(true, ColorScope::Line)
    }
}
