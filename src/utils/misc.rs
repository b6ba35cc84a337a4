use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

use super::AppError;

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Generate a new opaque identifier
pub fn new_id() -> String {
    ObjectId::new().to_hex()
}

/// Parse a date given either as `YYYY-MM-DD` or as RFC 3339
pub fn parse_date(value: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| {
            let err = format!("Invalid date for `{field}`: {value}");
            AppError::BadRequestErr(err)
        })
}

/// Parse an optional date, blank strings count as absent
pub fn parse_optional_date(
    value: Option<&str>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value, field).map(Some),
    }
}

/// Returns the trimmed value when it has any non-whitespace char
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Lenient integer parsing for form values, a number or a numeric string
pub fn lenient_u32(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
