use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::types::errors::FieldError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

//NOTE: `%.f` also matches an absent fractional part, so these cover both whole and fractional seconds
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a signed decimal amount without ever going through floating point.
///
/// Accepts an optional leading `+` or `-`. Values that cannot be represented
/// exactly (more than 28 significant digits) are rejected instead of rounded.
pub fn parse_amount(raw: &str) -> Result<Decimal, FieldError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(FieldError::Missing { field: "amount" });
    }

    let invalid = |reason: String| FieldError::InvalidAmount { value: value.to_string(), reason };
    let unsigned = value.strip_prefix('+').unwrap_or(value);

    if unsigned.starts_with(['+', '-']) && unsigned.len() != value.len() {
        return Err(invalid("Value has more than one sign".to_string()));
    }

    if unsigned.contains(['_', ',']) {
        return Err(invalid("Value contains digit separators".to_string()));
    }

    Decimal::from_str_exact(unsigned).map_err(|error| invalid(error.to_string()))
}

/// Parses the calendar date of a record.
///
/// A date-time value is accepted as well, in which case only its date part is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(FieldError::Missing { field: "date" });
    }

    DATE_FORMATS.iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| parse_date_time(value).map(|date_time| date_time.date()))
        .ok_or_else(|| FieldError::InvalidDate { field: "date", value: value.to_string() })
}

/// Parses an optional timestamp. An empty value is `Ok(None)`.
pub fn parse_timestamp(raw: &str) -> Result<Option<NaiveDateTime>, FieldError> {
    let value = raw.trim();

    if value.is_empty() {
        return Ok(None);
    }

    parse_date_time(value)
        .map(Some)
        .ok_or_else(|| FieldError::InvalidTimestamp { value: value.to_string() })
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|date_time| date_time.naive_utc()))
}

