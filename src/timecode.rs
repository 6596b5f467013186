//! Datalogger timestamps.
//!
//! The datalogger stamps every record with whole seconds since 1990-01-01T00:00:00Z
//! rather than the Unix epoch.
use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds between the Unix epoch (1970) and the datalogger epoch (1990).
pub const EPOCH_DELTA: i64 = 631_152_000;

/// Format of the `time` column in text logs, e.g., `2024/05/01T12:00:00Z`.
pub const TIME_FORMAT: &str = "%Y/%m/%dT%H:%M:%SZ";

/// Convert datalogger seconds into a UTC timestamp.
#[must_use]
pub fn decode(secs: u32) -> DateTime<Utc> {
    // u32 seconds past 1990 is always within chrono's range
    DateTime::from_timestamp(EPOCH_DELTA + i64::from(secs), 0).unwrap_or_default()
}

/// Convert a UTC timestamp into datalogger seconds. Returns `None` for times that
/// cannot be represented, i.e., before 1990 or after 2126.
#[must_use]
pub fn encode(time: &DateTime<Utc>) -> Option<u32> {
    u32::try_from(time.timestamp() - EPOCH_DELTA).ok()
}

/// Render `time` the way it appears in the `time` column.
#[must_use]
pub fn format(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a `time` column value.
///
/// # Errors
/// If `s` does not match [TIME_FORMAT].
pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(NaiveDateTime::parse_from_str(s, TIME_FORMAT)?.and_utc())
}

/// Seconds elapsed between `time` and `now`. Negative if `time` is in the future.
#[must_use]
pub fn latency(time: &DateTime<Utc>, now: &DateTime<Utc>) -> f64 {
    (*now - *time).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_is_1990() {
        let expected = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(decode(0), expected);
    }

    #[test]
    fn decode_known_time() {
        // 2024-05-01T12:00:00Z
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let secs = u32::try_from(expected.timestamp() - EPOCH_DELTA).unwrap();
        assert_eq!(decode(secs), expected);
        assert_eq!(encode(&expected), Some(secs));
    }

    #[test]
    fn encode_before_epoch() {
        let time = Utc.with_ymd_and_hms(1989, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(encode(&time), None);
    }

    #[test]
    fn format_and_parse() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 7, 8, 9).unwrap();
        let s = format(&time);
        assert_eq!(s, "2024/05/01T07:08:09Z");
        assert_eq!(s.len(), 20);
        assert_eq!(parse(&s).unwrap(), time);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse("2024-05-01 07:08:09").is_err());
    }

    #[test]
    fn latency_seconds() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 10, 0).unwrap();
        assert_eq!(latency(&time, &now), 600.0);
    }
}
