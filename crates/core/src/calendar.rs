//! Calendar-date parsing and day arithmetic.
//!
//! Accepted date formats:
//! - `YYYY-MM-DD`
//! - naive timestamps `YYYY-MM-DDTHH:MM:SS[.fff]` (time part ignored)
//! - RFC 3339 timestamps (the date is taken in the timestamp's own offset)

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{DomainError, DomainResult};

/// Parse a caller-supplied date string into a calendar date.
pub fn parse_calendar_date(raw: &str) -> DomainResult<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DomainError::invalid_date("empty date string"));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(DomainError::invalid_date(format!("unrecognised date '{raw}'")))
}

/// Zero-based weekday index with Monday = 0 and Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_iso_date() {
        assert_eq!(parse_calendar_date("2024-01-05").unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_calendar_date("  2024-01-05 ").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn parses_timestamps_by_their_date_part() {
        assert_eq!(
            parse_calendar_date("2024-03-10T23:15:00").unwrap(),
            ymd(2024, 3, 10)
        );
        assert_eq!(
            parse_calendar_date("2024-03-10T23:15:00.250").unwrap(),
            ymd(2024, 3, 10)
        );
        assert_eq!(
            parse_calendar_date("2024-03-10T23:15:00+05:30").unwrap(),
            ymd(2024, 3, 10)
        );
        assert_eq!(
            parse_calendar_date("2024-03-10T08:00:00Z").unwrap(),
            ymd(2024, 3, 10)
        );
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        for raw in ["", "   ", "yesterday", "2024-13-01", "2024-02-30", "01/05/2024"] {
            match parse_calendar_date(raw) {
                Err(DomainError::InvalidDate(_)) => {}
                other => panic!("expected InvalidDate for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn weekday_index_starts_on_monday() {
        // 2024-01-01 was a Monday.
        assert_eq!(weekday_index(ymd(2024, 1, 1)), 0);
        assert_eq!(weekday_index(ymd(2024, 1, 3)), 2);
        assert_eq!(weekday_index(ymd(2024, 1, 7)), 6);
    }

    #[test]
    fn days_between_is_signed() {
        let today = ymd(2024, 1, 1);
        assert_eq!(days_between(today, ymd(2024, 1, 5)), 4);
        assert_eq!(days_between(today, ymd(2023, 12, 25)), -7);
        assert_eq!(days_between(today, today), 0);
    }

    proptest! {
        #[test]
        fn days_between_inverts_date_offsets(start in 0i64..60_000, offset in -400i64..400) {
            let from = ymd(1970, 1, 1) + chrono::Duration::days(start);
            let to = from + chrono::Duration::days(offset);
            prop_assert_eq!(days_between(from, to), offset);
            prop_assert!(weekday_index(to) <= 6);
        }
    }
}
