//! Timestamp decoding for exported records.
//! Accepts RFC 3339 with offset, naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` as local time,
//! and a bare `YYYY-MM-DD` as local midnight.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{de, Deserialize, Deserializer};

pub fn parse(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(local_to_fixed(&naive))
}

/// Interpret a wall-clock time in the host's zone. Times inside a DST gap are read as UTC.
pub fn local_to_fixed(naive: &NaiveDateTime) -> DateTime<FixedOffset> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(naive))
        .fixed_offset()
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<FixedOffset>, D::Error> {
    let text = String::deserialize(d)?;
    parse(&text).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp `{}`", text)))
}
