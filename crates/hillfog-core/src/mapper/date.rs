//! Legacy timestamps <-> ISO-8601
//!
//! The backend renders dates either as `"yyyy-MM-dd HH:mm:ss"` or as a
//! 14-digit compact `"yyyyMMddHHmmss"`. Both are interpreted as UTC. Anything
//! else goes through a handful of generic formats before giving up.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// Standard wire format, also used when encoding.
pub const LEGACY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact 14-digit wire format.
pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Parse any accepted date representation into a UTC instant.
pub fn parse(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains('-') && s.contains(':') {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, LEGACY_FORMAT) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    } else if s.len() == 14 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDateTime::parse_from_str(s, COMPACT_FORMAT)
            .ok()
            .map(|dt| Utc.from_utc_datetime(&dt));
    }

    parse_generic(s)
}

fn parse_generic(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    FALLBACK_DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt))
    })
}

/// Render an instant as canonical ISO-8601 (`2024-01-02T03:04:05.000Z`).
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render an instant in the legacy wire format.
pub fn to_legacy(dt: &DateTime<Utc>) -> String {
    dt.format(LEGACY_FORMAT).to_string()
}

/// Decode a legacy timestamp to ISO-8601. Returns `None` when unparsable.
pub fn decode(input: &str) -> Option<String> {
    match parse(input) {
        Some(dt) => Some(to_iso(&dt)),
        None => {
            tracing::warn!("Failed to parse date: {:?}", input);
            None
        }
    }
}

/// Decode a wire value: strings as timestamps, numbers as epoch milliseconds.
pub fn decode_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => decode(s),
        Value::Number(n) => match n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            Some(dt) => Some(to_iso(&dt)),
            None => {
                tracing::warn!("Failed to parse epoch date: {}", n);
                None
            }
        },
        _ => None,
    }
}

/// Encode an ISO-8601 (or any accepted) date into `"YYYY-MM-DD HH:MM:SS"`.
pub fn encode(input: &str) -> Option<String> {
    match parse(input) {
        Some(dt) => Some(to_legacy(&dt)),
        None => {
            tracing::warn!("Failed to format date: {:?}", input);
            None
        }
    }
}
