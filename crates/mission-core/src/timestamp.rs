use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, PrimitiveDateTime};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// Offset-less layouts accepted after RFC 3339 fails. Interpreted as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]",
    "[year]-[month]-[day]T[hour]:[minute]:[second]",
    "[year]-[month]-[day] [hour]:[minute]:[second]",
];

/// Current wall-clock time as epoch seconds.
pub fn now_epoch() -> f64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9
}

/// Coerce a loosely-typed JSON timestamp into epoch seconds.
///
/// Numbers pass through, numeric strings are parsed, date strings are read as
/// RFC 3339 (or an offset-less ISO form, taken as UTC). Everything else is
/// `0.0`, which sorts last in descending feeds.
pub fn coerce_timestamp(value: &Value) -> f64 {
    let ts = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_timestamp_str(s).unwrap_or(0.0),
        _ => 0.0,
    };
    if ts.is_finite() {
        ts
    } else {
        0.0
    }
}

/// Parse a timestamp string (numeric epoch or ISO-8601 date-time).
pub fn parse_timestamp_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<f64>() {
        return n.is_finite().then_some(n);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(to_epoch(dt));
    }
    for layout in NAIVE_LAYOUTS {
        let Ok(format) = time::format_description::parse(layout) else {
            continue;
        };
        if let Ok(dt) = PrimitiveDateTime::parse(s, &format) {
            return Some(to_epoch(dt.assume_utc()));
        }
    }
    None
}

fn to_epoch(dt: OffsetDateTime) -> f64 {
    dt.unix_timestamp_nanos() as f64 / 1e9
}

/// Relative-time label: `3d ago`, `5h ago`, `12m ago`, or `Just now`.
///
/// Floor-divides to whole units, largest unit first. A zero (unknown)
/// timestamp reads `Unknown`; timestamps in the future read `Just now`.
pub fn relative_label(ts: f64, now: f64) -> String {
    if !ts.is_finite() || ts <= 0.0 {
        return "Unknown".to_string();
    }
    let diff = now - ts;
    if diff <= 0.0 {
        return "Just now".to_string();
    }
    let secs = diff.floor() as i64;
    let days = secs / SECS_PER_DAY;
    if days > 0 {
        return format!("{days}d ago");
    }
    let hours = secs / SECS_PER_HOUR;
    if hours > 0 {
        return format!("{hours}h ago");
    }
    let minutes = secs / SECS_PER_MINUTE;
    if minutes > 0 {
        return format!("{minutes}m ago");
    }
    "Just now".to_string()
}

/// Render epoch seconds as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_utc(ts: f64) -> String {
    let rendered = time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
        .ok()
        .and_then(|format| {
            let dt = OffsetDateTime::from_unix_timestamp(ts.floor() as i64).ok()?;
            dt.format(&format).ok()
        });
    rendered.unwrap_or_else(|| ts.to_string())
}
