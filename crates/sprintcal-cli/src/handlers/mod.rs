pub mod calendar;
pub mod sprint;
pub mod transfer;

use chrono::NaiveDate;

/// Parse a CLI date: `YYYY-MM-DD` or an RFC 3339 timestamp, whose calendar
/// date is taken in its own offset.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid date '{}'. Supported formats: YYYY-MM-DD or RFC 3339 (e.g., 2024-01-15T10:30:00Z)",
                s
            )
        })
}

pub fn parse_optional_date(s: Option<String>) -> anyhow::Result<Option<NaiveDate>> {
    s.as_deref().map(parse_date).transpose()
}
