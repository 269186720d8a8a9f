//! Packet timestamp rendering and day boundaries.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

/// Offset stamped on every packet timestamp (UTC+05:30).
pub const PACKET_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// strftime pattern for packet timestamps, e.g. `2024-01-01T00:05:00+0530`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Seconds from midnight to the last generated minute of a day (23:59:00).
pub const DAY_END_SECS: i64 = 23 * 3600 + 59 * 60;

/// The fixed packet offset.
pub fn packet_offset() -> FixedOffset {
    FixedOffset::east_opt(PACKET_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Render a wall-clock instant as a packet timestamp.
///
/// The instant is read as local time in the packet offset; the host
/// timezone plays no part.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    let offset = packet_offset();
    let utc = at - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::<FixedOffset>::from_naive_utc_and_offset(utc, offset)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:00 on `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::seconds(DAY_END_SECS)
}
