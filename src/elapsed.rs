//! elapsed.rs
//!
//! Human-readable "last updated" labels in the format:
//!     "X days, Y hours ago"
//!
//! Only the largest unit and the one below it are shown, zeros omitted.
//! Anything under a minute (or in the future, when clocks disagree) reads
//! as "just now".

use chrono::{DateTime, Utc};

/// Returns how long ago `since` was, relative to `now`.
pub fn elapsed_string(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let total_minutes = (now - since).num_minutes();
    if total_minutes < 1 {
        return "just now".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .skip_while(|(n, _)| *n == 0)
        .take(2)
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n} {unit}{}", plural(n)))
        .collect();

    format!("{} ago", parts.join(", "))
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_just_now() {
        assert_eq!(elapsed_string(at(10, 0), at(10, 0)), "just now");
        assert_eq!(elapsed_string(at(10, 5), at(10, 0)), "just now");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(elapsed_string(at(10, 0), at(10, 1)), "1 minute ago");
        assert_eq!(elapsed_string(at(9, 0), at(10, 30)), "1 hour, 30 minutes ago");
        assert_eq!(elapsed_string(at(8, 0), at(10, 0)), "2 hours ago");
    }

    #[test]
    fn test_days_drop_minutes() {
        let since = at(10, 0);
        let now = since + Duration::days(1) + Duration::hours(3) + Duration::minutes(12);
        assert_eq!(elapsed_string(since, now), "1 day, 3 hours ago");
    }

    #[test]
    fn test_days_skip_zero_hours() {
        let since = at(10, 0);
        let now = since + Duration::days(2) + Duration::minutes(5);
        assert_eq!(elapsed_string(since, now), "2 days ago");
    }
}
