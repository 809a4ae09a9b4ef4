use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("failed to parse {field}"))
}

/// Decode a JSON-array text column into an ordered string list.
pub fn parse_string_list(value: &str, field: &str) -> Result<Vec<String>> {
    serde_json::from_str(value).with_context(|| format!("failed to parse {field}"))
}

pub fn encode_string_list(values: &[String]) -> Result<String> {
    serde_json::to_string(values).map_err(|err| anyhow!("failed to encode string list: {err}"))
}
