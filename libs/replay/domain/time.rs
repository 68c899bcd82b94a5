//! Display-time helpers

use chrono::{DateTime, FixedOffset};

/// Default display offset (UTC+8)
pub const DEFAULT_DISPLAY_OFFSET_HOURS: i32 = 8;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build a fixed offset from whole hours east of UTC
pub fn display_offset(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours * 3600)
}

/// Default display offset
pub fn default_display_offset() -> FixedOffset {
    display_offset(DEFAULT_DISPLAY_OFFSET_HOURS).expect("UTC+8 is a valid offset")
}

/// Format unix seconds in a fixed offset ("YYYY-MM-DD HH:MM:SS")
pub fn format_timestamp(timestamp: i64, offset: &FixedOffset) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(offset).format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// Column label for a display offset (e.g., "time_utc8", "time_utc-5")
pub fn offset_label(offset: &FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds % 3600 == 0 {
        format!("time_utc{}", seconds / 3600)
    } else {
        format!("time_utc{}m", seconds / 60)
    }
}

/// Parse an ISO 8601 / RFC 3339 time (e.g., "2025-12-28T11:15:00Z") to unix seconds
pub fn parse_event_time(time: &str) -> Result<i64, chrono::ParseError> {
    DateTime::parse_from_rfc3339(time).map(|dt| dt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_in_utc8() {
        let offset = default_display_offset();
        // 2025-12-28T11:15:00Z
        assert_eq!(format_timestamp(1766920500, &offset), "2025-12-28 19:15:00");
        assert_eq!(offset_label(&offset), "time_utc8");
    }

    #[test]
    fn test_negative_offset_label() {
        let offset = display_offset(-5).unwrap();
        assert_eq!(offset_label(&offset), "time_utc-5");
        assert_eq!(format_timestamp(0, &offset), "1969-12-31 19:00:00");
    }

    #[test]
    fn test_parse_event_time() {
        assert_eq!(parse_event_time("2025-12-28T11:15:00Z").unwrap(), 1766920500);
        assert_eq!(parse_event_time("2025-12-28T11:15:00+00:00").unwrap(), 1766920500);
        assert!(parse_event_time("not a time").is_err());
    }
}
