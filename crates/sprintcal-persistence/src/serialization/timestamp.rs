use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use sprintcal_core::{SprintError, SprintResult};

/// Encode a calendar date as UTC midnight, e.g. `2024-01-15T00:00:00.000Z`.
pub fn encode_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a stored timestamp back to a calendar date.
///
/// RFC 3339 timestamps yield the date in their own offset, so the result does
/// not depend on the local timezone of the machine decoding them. Bare dates
/// and offset-less timestamps are accepted as written.
pub fn decode_date(text: &str) -> SprintResult<NaiveDate> {
    let text = text.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    Err(SprintError::CorruptData(format!(
        "unrecognized date '{}'",
        text
    )))
}
