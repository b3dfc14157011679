//! Call-site resolution.
//!
//! The call site of a line is the source location of the code that invoked the logging call, as opposed to any
//! logging wrapper in between. Instead of walking the stack and skipping a fixed number of frames, every logging
//! entry point is `#[track_caller]`, so the location reported by [`Location::caller`] is the first frame that is not
//! itself a tracked wrapper. The logging macros additionally capture the path of the enclosing function.
//!
//! Resolution never fails: anything that is not known is left empty (or zero for the line).

use std::panic::Location;

/// The source location a line was logged from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Fully-qualified path of the calling function, empty if unknown.
    pub function: &'static str,
    /// Source file path, empty if unknown.
    pub file: &'static str,
    /// 1-based line number, zero if unknown.
    pub line: u32,
}

impl CallSite {
    /// A call site that could not be resolved.
    pub const UNKNOWN: CallSite = CallSite::new("", "", 0);

    /// Creates a call site from its parts.
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function,
            file,
            line,
        }
    }

    /// Returns the location of the nearest caller that is not `#[track_caller]`.
    ///
    /// The function name is not available this way and is left empty.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// Creates a call site from a [`Location`], leaving the function empty.
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new("", location.file(), location.line())
    }

    /// Replaces the function path.
    pub const fn with_function(self, function: &'static str) -> Self {
        Self { function, ..self }
    }
}

/// Maps the captured call site onto the one that is reported.
///
/// The default is [`resolve_captured`]; tests substitute a function returning a fixed call site.
pub type ResolveFn = fn(CallSite) -> CallSite;

/// Reports the captured call site unchanged.
pub fn resolve_captured(call_site: CallSite) -> CallSite {
    call_site
}

/// Strips the source-root prefix from a file path.
///
/// Everything up to and including the last path segment equal to `root` is removed, leaving the path relative to
/// that root (`/path/to/gopath/src/ourpackage/test.go` becomes `ourpackage/test.go` for `root = "src"`). Paths without
/// such a segment, or where nothing follows it, are returned unchanged.
pub fn trim_source_root<'a>(file: &'a str, root: &str) -> &'a str {
    if root.is_empty() {
        return file;
    }

    let mut trimmed = file;
    let mut offset = 0;
    for segment in file.split(['/', '\\']) {
        // Separators are a single byte.
        let next = offset + segment.len() + 1;
        if segment == root && next < file.len() {
            trimmed = &file[next..];
        }
        offset = next;
    }
    trimmed
}
