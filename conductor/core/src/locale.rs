//! Locale Formatting
//!
//! Turns instants into display strings. The conversation model only stores
//! instants; this is where the `hi-IN` conventions live.

use chrono::{DateTime, FixedOffset};

/// Formats instants for display
pub trait LocaleFormat: Send + Sync {
    /// Full time of day, as embedded in time replies
    fn time(&self, at: &DateTime<FixedOffset>) -> String;

    /// Calendar date, as embedded in date replies
    fn date(&self, at: &DateTime<FixedOffset>) -> String;

    /// Short hour:minute stamp shown under each message
    fn clock(&self, at: &DateTime<FixedOffset>) -> String;
}

/// India-standard (`hi-IN`) formatting: `3:45:12 pm`, `19/10/2026`, `03:45 pm`
#[derive(Clone, Copy, Debug, Default)]
pub struct HindiIndia;

impl LocaleFormat for HindiIndia {
    fn time(&self, at: &DateTime<FixedOffset>) -> String {
        at.format("%-I:%M:%S %P").to_string()
    }

    fn date(&self, at: &DateTime<FixedOffset>) -> String {
        at.format("%-d/%-m/%Y").to_string()
    }

    fn clock(&self, at: &DateTime<FixedOffset>) -> String {
        at.format("%I:%M %P").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(330 * 60)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 9, h, m, s)
            .unwrap()
    }

    #[test]
    fn test_time_uses_twelve_hour_clock() {
        assert_eq!(HindiIndia.time(&at(15, 45, 12)), "3:45:12 pm");
        assert_eq!(HindiIndia.time(&at(0, 5, 9)), "12:05:09 am");
    }

    #[test]
    fn test_date_is_day_month_year() {
        assert_eq!(HindiIndia.date(&at(9, 0, 0)), "9/10/2026");
    }

    #[test]
    fn test_clock_is_two_digit() {
        assert_eq!(HindiIndia.clock(&at(9, 7, 0)), "09:07 am");
    }
}
