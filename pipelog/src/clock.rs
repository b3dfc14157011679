//! Clock strategy and timestamp rendering.
//!
//! The clock is a plain function pointer handed to the [`Logger`][crate::Logger] at construction, so tests can pin
//! the time without touching any global state.
//!
//! # Timestamp Format
//!
//! Lines carry the time of day only, `HH:MM:SS` followed by up to six fractional digits. Trailing zeros of the
//! fraction are dropped, as is the dot for whole seconds.

use std::fmt;

use time::OffsetDateTime;

/// Supplies the current time.
pub type ClockFn = fn() -> OffsetDateTime;

/// Returns the current local time.
///
/// Falls back to UTC if the local offset can not be determined, which is the case on some Unix platforms once the
/// process has spawned threads.
pub fn system_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Renders the time of day of a timestamp with microsecond resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeOfDay(pub OffsetDateTime);

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute, second, micros) = self.0.to_hms_micro();
        write!(f, "{hour:02}:{minute:02}:{second:02}")?;

        if micros == 0 {
            return Ok(());
        }

        let mut digits = 6;
        let mut fraction = micros;
        while fraction % 10 == 0 {
            fraction /= 10;
            digits -= 1;
        }
        write!(f, ".{fraction:0digits$}")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use time::macros::datetime;

    use super::TimeOfDay;

    #[test_case(datetime!(2015-12-21 17:50:22.615673 UTC), "17:50:22.615673")]
    #[test_case(datetime!(2015-12-21 17:50:22.5 UTC), "17:50:22.5")]
    #[test_case(datetime!(2015-12-21 17:50:22.000040 UTC), "17:50:22.00004")]
    #[test_case(datetime!(2015-12-21 07:05:02 UTC), "07:05:02")]
    #[test_case(datetime!(2015-12-21 00:00:00.000001 UTC), "00:00:00.000001")]
    fn renders_time_of_day(time: time::OffsetDateTime, expected: &str) {
        assert_eq!(TimeOfDay(time).to_string(), expected);
    }

    #[test]
    fn ignores_sub_microsecond_precision() {
        let time = datetime!(2015-12-21 17:50:22.615673999 UTC);
        assert_eq!(TimeOfDay(time).to_string(), "17:50:22.615673");
    }
}
