use chrono::{DateTime, Local, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Format a timestamp relative to now: "yesterday" for anything up to
/// a day old, "N days ago" under a week, a plain date beyond that.
///
/// The day count rounds up, so a timestamp from a few hours ago
/// already reads as "yesterday".
pub fn format_relative_date(timestamp: DateTime<Utc>) -> String {
    let diff_ms = Utc::now()
        .signed_duration_since(timestamp)
        .num_milliseconds()
        .abs();
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;

    if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}
