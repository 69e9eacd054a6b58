//! Rendering of stored record timestamps as calendar days.
//!
//! Stored dates are RFC-3339 UTC instants (`2023-06-01T16:00:00.000Z`). Reports
//! show the calendar day of that instant in a chosen zone, normally the host's
//! local zone, so an instant near midnight UTC can land on the next day.

use std::fmt::Display;

use anyhow::Context;
use chrono::{DateTime, TimeZone};

/// Formats an RFC-3339 timestamp as `YYYY-MM-DD` in `tz`.
///
/// Example (UTC+8):
/// - "2023-06-01T16:00:00.000Z" -> "2023-06-02"
pub fn format_local_date<Tz>(date: &str, tz: &Tz) -> anyhow::Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let dt = DateTime::parse_from_rfc3339(date).with_context(|| format!("bad rfc3339: {date}"))?;
    Ok(dt.with_timezone(tz).format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn utc_keeps_the_stored_day() {
        let got = format_local_date("2023-06-01T00:00:00.000Z", &Utc).unwrap();
        assert_eq!(got, "2023-06-01");
    }

    #[test]
    fn east_of_utc_rolls_over_midnight() {
        // 16:00Z is midnight in UTC+8.
        let cst = FixedOffset::east_opt(8 * 3600).unwrap();
        let got = format_local_date("2023-06-01T16:00:00.000Z", &cst).unwrap();
        assert_eq!(got, "2023-06-02");
    }

    #[test]
    fn west_of_utc_falls_back_a_day() {
        let ny = FixedOffset::west_opt(5 * 3600).unwrap();
        let got = format_local_date("2023-06-01T00:00:00.000Z", &ny).unwrap();
        assert_eq!(got, "2023-05-31");
    }

    #[test]
    fn non_rfc3339_is_an_error() {
        let err = format_local_date("2023/06/01", &Utc).unwrap_err();
        assert!(err.to_string().contains("2023/06/01"));
    }
}
