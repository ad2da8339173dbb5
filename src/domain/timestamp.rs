//! Timestamps as the backend services write them.
//!
//! The order service writes zone-less local date-times
//! (`2025-03-01T10:15:00.123`), the payments service RFC 3339, and some
//! deployments serialize date-times as `[y, m, d, h, min, s, nanos]` arrays.
//! All three are read as UTC. Anything else decodes as `None` so one odd field
//! never fails a whole listing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses one timestamp string, with or without an offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn from_parts(parts: &[Value]) -> Option<DateTime<Utc>> {
    let part = |index: usize| parts.get(index).and_then(Value::as_u64).unwrap_or(0);
    let year = i32::try_from(parts.first()?.as_i64()?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, u32::try_from(part(1)).ok()?, u32::try_from(part(2)).ok()?)?;
    let time = date.and_hms_nano_opt(
        u32::try_from(part(3)).ok()?,
        u32::try_from(part(4)).ok()?,
        u32::try_from(part(5)).ok()?,
        u32::try_from(part(6)).ok()?,
    )?;
    Some(time.and_utc())
}

/// `deserialize_with` target for optional backend timestamps.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => parse_timestamp(&raw),
        Some(Value::Array(parts)) => from_parts(&parts),
        _ => None,
    })
}
