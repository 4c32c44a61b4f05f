use chrono::{DateTime, Duration, FixedOffset};

/// Pakistan Standard Time, UTC+05:00, no daylight saving.
const PKT_OFFSET_SECONDS: i64 = 5 * 60 * 60;

pub fn datetime_to_string(datetime: DateTime<FixedOffset>) -> String {
    (datetime.naive_utc() + Duration::seconds(PKT_OFFSET_SECONDS))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
