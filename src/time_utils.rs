// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Display format for dashboard rows (day-month-year, no time component).
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Offset-aware layouts tried when RFC 3339 parsing fails (minute
/// precision, offsets without a colon).
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Naive datetime layouts accepted after the offset-aware parse fails.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Rewrite a trailing literal `Z` as an explicit `+00:00` offset.
pub fn normalize_zulu(value: &str) -> String {
    match value.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => value.to_string(),
    }
}

/// Add `:00` minutes to an hour-only time such as `2024-08-01T10` or
/// `2024-08-01T10+02:00`; chrono needs the minute to build a time.
fn expand_hour_only(value: String) -> String {
    let bytes = value.as_bytes();
    let hour_only = bytes.len() >= 13
        && matches!(bytes[10], b'T' | b' ')
        && bytes[11].is_ascii_digit()
        && bytes[12].is_ascii_digit()
        && matches!(bytes.get(13), None | Some(b'+') | Some(b'-'));

    if hour_only {
        format!("{}:00{}", &value[..13], &value[13..])
    } else {
        value
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset (a trailing `Z` is treated as UTC),
/// minute- or hour-precision times, offsets with or without a colon,
/// naive date-times, and bare dates. Values without an offset are taken
/// to be UTC.
pub fn parse_iso8601(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let normalized = expand_hour_only(normalize_zulu(value.trim()));

    let err = match DateTime::parse_from_rfc3339(&normalized) {
        Ok(dt) => return Ok(dt),
        Err(e) => e,
    };

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Ok(dt);
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(err)
}

/// Format a timestamp as `DD-MM-YYYY` in its own offset.
pub fn format_display_date(date: &DateTime<FixedOffset>) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// First second of `date` in UTC, as sent to the fetch endpoint.
pub fn start_of_day_utc(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00Z").to_string()
}

/// Last second of `date` in UTC, as sent to the fetch endpoint.
pub fn end_of_day_utc(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT23:59:59Z").to_string()
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_normalize_zulu() {
        assert_eq!(
            normalize_zulu("2024-08-01T23:59:59Z"),
            "2024-08-01T23:59:59+00:00"
        );
        assert_eq!(
            normalize_zulu("2024-08-01T23:59:59+02:00"),
            "2024-08-01T23:59:59+02:00"
        );
    }

    #[test]
    fn test_parse_zulu_and_offset() {
        let dt = parse_iso8601("2024-08-01T23:59:59Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.hour(), 23);

        let dt = parse_iso8601("2024-08-01T10:00:00.123+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_parse_naive_forms_as_utc() {
        let dt = parse_iso8601("2024-08-01T06:30:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.minute(), 30);

        let dt = parse_iso8601("2024-08-01").unwrap();
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_reduced_precision_and_offset_forms() {
        let cases = [
            ("2024-08-01T10:00Z", "2024-08-01T10:00:00+00:00"),
            ("2024-08-01T10:00+02:00", "2024-08-01T10:00:00+02:00"),
            ("2024-08-01T10:00:00+0000", "2024-08-01T10:00:00+00:00"),
            ("2024-08-01T10:00:00.5-0530", "2024-08-01T10:00:00.500-05:30"),
            ("2024-08-01 10:00:00+00:00", "2024-08-01T10:00:00+00:00"),
            ("2024-08-01 10:00", "2024-08-01T10:00:00+00:00"),
            ("2024-08-01T10", "2024-08-01T10:00:00+00:00"),
            ("2024-08-01T10Z", "2024-08-01T10:00:00+00:00"),
            ("2024-08-01T10+02:00", "2024-08-01T10:00:00+02:00"),
        ];

        for (input, expected) in cases {
            let dt = parse_iso8601(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(
                dt,
                DateTime::parse_from_rfc3339(expected).unwrap(),
                "input {input}"
            );
            assert_eq!(
                dt.offset(),
                DateTime::parse_from_rfc3339(expected).unwrap().offset(),
                "offset of {input}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_iso8601("not-a-date").is_err());
        assert!(parse_iso8601("").is_err());
        assert!(parse_iso8601("2024-13-01T00:00:00Z").is_err());
        assert!(parse_iso8601("2024-08-01T25").is_err());
        assert!(parse_iso8601("2024-08-01T1").is_err());
    }

    #[test]
    fn test_format_display_date_uses_own_offset() {
        let dt = parse_iso8601("2024-08-01T23:30:00-05:00").unwrap();
        assert_eq!(format_display_date(&dt), "01-08-2024");
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(start_of_day_utc(date), "2024-08-01T00:00:00Z");
        assert_eq!(end_of_day_utc(date), "2024-08-01T23:59:59Z");
    }
}
