use chrono::{DateTime, Utc};

/// Human readable distance between a unix timestamp and `now`, e.g. "3 hours ago" or "in 2 days".
pub fn from_now(timestamp: i64, now: DateTime<Utc>) -> String {
    let delta = timestamp - now.timestamp();
    let phrase = humanize(delta.unsigned_abs());
    if delta > 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// Buckets are picked on the rounded count, so a count never reaches the next bucket's edge.
fn humanize(seconds: u64) -> String {
    let s = seconds as f64;
    let minutes = (s / 60.0).round() as u64;
    let hours = (s / 3600.0).round() as u64;
    let days = (s / 86400.0).round() as u64;
    let months = (s / (86400.0 * 30.436875)).round() as u64;
    let years = (s / (86400.0 * 365.2425)).round() as u64;

    if seconds < 45 {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{} hours", hours)
    } else if days <= 1 {
        "a day".to_string()
    } else if days < 26 {
        format!("{} days", days)
    } else if months <= 1 {
        "a month".to_string()
    } else if months < 11 {
        format!("{} months", months)
    } else if years <= 1 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}
