use chrono::{DateTime, Utc};

/// Human-friendly age of a timestamp relative to `now`
///
/// "just now" under a minute, then whole minutes, hours and days up to a
/// week, then the calendar date as M/D/YYYY.
pub fn format_relative(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        created_at.format("%-m/%-d/%Y").to_string()
    }
}
