//! Rendering of a single record into one delimited line.
//!
//! The richest line layout is
//!
//! ```text
//! SEVERITY|HH:MM:SS.ffffff|PID|FILE|FUNCTION|LINE|MESSAGE
//! ```
//!
//! The process id and the call-site fields can be dropped through [`Fields`]; the layout is otherwise fixed.

use std::borrow::Cow;
use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::caller::{CallSite, trim_source_root};
use crate::clock::TimeOfDay;
use crate::color::{ColorAnnotator, ColorScope};
use crate::severity::Severities;

/// Separator between the fields of a line.
pub const SEPARATOR: char = '|';

/// The source-root segment stripped from call-site file paths by default.
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Optional fields of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// Render the process id.
    pub process_id: bool,
    /// Render the call-site file, function and line.
    pub call_site: bool,
}

impl Fields {
    /// Every field is rendered.
    pub const ALL: Self = Self {
        process_id: true,
        call_site: true,
    };
}

impl Default for Fields {
    fn default() -> Self {
        Self::ALL
    }
}

/// Everything a single line is rendered from.
///
/// Records are transient, they only live for the duration of one write.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    /// The raw severity as passed by the caller.
    pub severity: Severities,
    /// When the line was logged.
    pub time: OffsetDateTime,
    /// The id of the logging process.
    pub process_id: u32,
    /// Where the line was logged from.
    pub call_site: CallSite,
    /// The message text.
    pub message: &'a dyn fmt::Display,
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("severity", &self.severity)
            .field("time", &self.time)
            .field("process_id", &self.process_id)
            .field("call_site", &self.call_site)
            .field("message", &format_args!("{}", self.message))
            .finish()
    }
}

/// Renders [`Record`]s into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    fields: Fields,
    source_root: Cow<'static, str>,
}

impl LineFormat {
    /// Creates a format rendering the given fields, trimming file paths up to `source_root`.
    pub fn new(fields: Fields, source_root: impl Into<Cow<'static, str>>) -> Self {
        Self {
            fields,
            source_root: source_root.into(),
        }
    }

    /// Returns the rendered fields.
    pub fn fields(&self) -> Fields {
        self.fields
    }

    /// Returns the source-root segment file paths are trimmed to.
    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    /// Appends the rendered, newline-terminated line for `record` to `output`.
    pub fn write_line(&self, record: &Record<'_>, color: &ColorAnnotator, output: &mut String) {
        let line_color = color.color_for(record.severity, ColorScope::Line);
        if line_color.is_none() {
            self.write_fields(record, color, output);
        } else {
            let mut line = String::new();
            self.write_fields(record, color, &mut line);
            ColorAnnotator::paint(line_color, &line, output);
        }
        output.push('\n');
    }

    fn write_fields(&self, record: &Record<'_>, color: &ColorAnnotator, output: &mut String) {
        let severity = record.severity.to_string();
        ColorAnnotator::paint(
            color.color_for(record.severity, ColorScope::Severity),
            &severity,
            output,
        );

        // Writing into a `String` can not fail, only a failing `Display` of the message can.
        let _ = write!(output, "{SEPARATOR}{}", TimeOfDay(record.time));

        if self.fields.process_id {
            let _ = write!(output, "{SEPARATOR}{}", record.process_id);
        }

        if self.fields.call_site {
            let CallSite {
                function,
                file,
                line,
            } = record.call_site;
            let file = trim_source_root(file, &self.source_root);
            let _ = write!(output, "{SEPARATOR}{file}{SEPARATOR}{function}{SEPARATOR}{line}");
        }

        let _ = write!(output, "{SEPARATOR}{}", record.message);
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::new(Fields::ALL, DEFAULT_SOURCE_ROOT)
    }
}
