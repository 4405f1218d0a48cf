use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};

/// Day keys and window bounds are rendered as plain ISO dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the start of day (00:00:00) for a given date, in UTC
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse an upstream `period` timestamp (RFC 3339) into UTC
pub fn parse_period(period: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(period)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::UpstreamResponse(format!("invalid period {period:?}: {e}")))
}

/// Parse a `YYYY-MM-DD` date as supplied by callers
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("invalid date {value:?}: {e}")))
}

/// Calendar day a timestamp falls on
pub fn day_key(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}
