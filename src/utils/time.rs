//! Relative time formatting.

use chrono::{DateTime, Local};

/// Describe how long ago `timestamp` was, relative to `now`.
///
/// `None` means the project has no readable files. Timestamps in the future
/// count as "Just now".
///
/// # Examples
///
/// ```
/// # use chrono::{Duration, Local};
/// # use scan_projects::utils::format_time_ago;
/// let now = Local::now();
/// assert_eq!(format_time_ago(None, now), "Never modified");
/// assert_eq!(format_time_ago(Some(now - Duration::seconds(59)), now), "Just now");
/// assert_eq!(format_time_ago(Some(now - Duration::hours(2)), now), "2 hours ago");
/// ```
#[must_use]
pub fn format_time_ago(timestamp: Option<DateTime<Local>>, now: DateTime<Local>) -> String {
    let Some(timestamp) = timestamp else {
        return "Never modified".to_string();
    };

    let elapsed = (now - timestamp).num_seconds();

    if elapsed < 60 {
        "Just now".to_string()
    } else if elapsed < 3600 {
        plural(elapsed / 60, "minute")
    } else if elapsed < 86_400 {
        plural(elapsed / 3600, "hour")
    } else {
        plural(elapsed / 86_400, "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(seconds: i64) -> String {
        let now = Local::now();
        format_time_ago(Some(now - Duration::seconds(seconds)), now)
    }

    #[test]
    fn test_never_modified() {
        assert_eq!(format_time_ago(None, Local::now()), "Never modified");
    }

    #[test]
    fn test_minute_boundaries() {
        assert_eq!(ago(0), "Just now");
        assert_eq!(ago(59), "Just now");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(119), "1 minute ago");
        assert_eq!(ago(120), "2 minutes ago");
        assert_eq!(ago(3599), "59 minutes ago");
    }

    #[test]
    fn test_hour_boundaries() {
        assert_eq!(ago(3600), "1 hour ago");
        assert_eq!(ago(7200), "2 hours ago");
        assert_eq!(ago(86_399), "23 hours ago");
    }

    #[test]
    fn test_day_boundaries() {
        assert_eq!(ago(86_400), "1 day ago");
        assert_eq!(ago(86_400 * 45), "45 days ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!(ago(-300), "Just now");
    }
}
