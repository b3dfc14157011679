//! Integration with the [`log`] facade.
//!
//! A [`Logger`] implements [`log::Log`], so records emitted through `log::info!` and friends, including those of
//! dependencies, end up in the same sink. `log` has no fatal level and an extra trace level, which is folded into
//! [`Severity::Debug`].
//!
//! The call-site function is reported as the module path of the record since `log` does not capture function names.

use crate::caller::CallSite;
use crate::logger::Logger;
use crate::severity::Severity;

/// Maps a `log` level onto a severity.
pub fn severity(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warn,
        log::Level::Info => Severity::Info,
        log::Level::Debug | log::Level::Trace => Severity::Debug,
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        Logger::enabled(self, severity(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let call_site = CallSite::new(
            record.module_path_static().unwrap_or_default(),
            record.file_static().unwrap_or_default(),
            record.line().unwrap_or_default(),
        );
        self.write(severity(record.level()), call_site, record.args());
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

/// Installs `logger` as the [`log`] facade's logger, forwarding every level.
///
/// Filtering is left to the logger's allowed severities.
pub fn init_log_bridge(logger: &'static Logger) -> Result<(), log::SetLoggerError> {
    log::set_logger(logger)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use log::Log;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use time::OffsetDateTime;
    use time::macros::datetime;

    use super::severity;
    use crate::logger::Logger;
    use crate::severity::{Severities, Severity};
    use crate::sink::MemorySink;

    #[test_case(log::Level::Error, Severity::Error)]
    #[test_case(log::Level::Warn, Severity::Warn)]
    #[test_case(log::Level::Info, Severity::Info)]
    #[test_case(log::Level::Debug, Severity::Debug)]
    #[test_case(log::Level::Trace, Severity::Debug)]
    fn maps_levels(level: log::Level, expected: Severity) {
        assert_eq!(severity(level), expected);
    }

    fn fixed_now() -> OffsetDateTime {
        datetime!(2015-12-21 17:50:22.615673 UTC)
    }

    #[test]
    fn forwards_records() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .output(sink.clone())
            .allowed(Severities::WARN)
            .color(false)
            .process_id(1234)
            .clock(fixed_now)
            .build();

        Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Warn)
                .args(format_args!("disk {}% full", 91))
                .module_path_static(Some("app::storage"))
                .file_static(Some("app/src/storage.rs"))
                .line(Some(12))
                .build(),
        );

        let filtered = log::Record::builder()
            .level(log::Level::Info)
            .args(format_args!("dropped"))
            .build();
        assert!(!Log::enabled(&logger, filtered.metadata()));
        Log::log(&logger, &filtered);

        assert_eq!(
            sink.contents(),
            "WARN|17:50:22.615673|1234|storage.rs|app::storage|12|disk 91% full\n"
        );
    }
}
