use chrono::{DateTime, Datelike, Utc};

use crate::models::{ComplaintStatus, NotificationType, Role};

pub fn status_label(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Pending => "Pending",
        ComplaintStatus::InProcess => "In Process",
        ComplaintStatus::Completed => "Completed",
        ComplaintStatus::Rejected => "Rejected",
    }
}

pub fn status_badge_class(status: ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Pending => "bg-amber-100 text-amber-800 dark:bg-amber-900/30 dark:text-amber-300",
        ComplaintStatus::InProcess => "bg-blue-100 text-blue-800 dark:bg-blue-900/30 dark:text-blue-300",
        ComplaintStatus::Completed => "bg-green-100 text-green-800 dark:bg-green-900/30 dark:text-green-300",
        ComplaintStatus::Rejected => "bg-red-100 text-red-800 dark:bg-red-900/30 dark:text-red-300",
    }
}

pub fn role_label(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "Admin",
        _ => "Student",
    }
}

/// (material icon name, background class)
pub fn notification_icon(kind: NotificationType) -> (&'static str, &'static str) {
    match kind {
        NotificationType::ComplaintUpdate => ("inbox", "bg-blue-500"),
        NotificationType::Announcement => ("campaign", "bg-purple-500"),
        NotificationType::System => ("inbox", "bg-green-500"),
        NotificationType::Other => ("notifications", "bg-slate-500"),
    }
}

/// `Jan 2, 2006`
pub fn format_date(at: DateTime<Utc>) -> String { at.format("%b %-d, %Y").to_string() }

/// Coarse age of a notification relative to `now`; a week or older falls back to a date,
/// with the year only when it differs from the current one.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0);
    let mins = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86_400;
    let plural = |n: i64| if n > 1 { "s" } else { "" };
    if mins < 1 { return "Just now".to_string(); }
    if mins < 60 { return format!("{} minute{} ago", mins, plural(mins)); }
    if hours < 24 { return format!("{} hour{} ago", hours, plural(hours)); }
    if days < 7 { return format!("{} day{} ago", days, plural(days)); }
    if at.year() != now.year() { format_date(at) } else { at.format("%b %-d").to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap() }

    #[test]
    fn dates_render_like_the_dashboard() {
        assert_eq!(format_date(at(2024, 3, 1, 8, 0)), "Mar 1, 2024");
        assert_eq!(status_label(ComplaintStatus::InProcess), "In Process");
        assert_eq!(role_label(None), "Student");
    }

    #[test]
    fn relative_time_buckets() {
        let now = at(2024, 6, 15, 12, 0);
        assert_eq!(relative_time(now - Duration::seconds(30), now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(1), now), "1 day ago");
        assert_eq!(relative_time(at(2024, 5, 2, 9, 0), now), "May 2");
        assert_eq!(relative_time(at(2023, 12, 30, 9, 0), now), "Dec 30, 2023");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        let now = at(2024, 6, 15, 12, 0);
        assert_eq!(relative_time(now + Duration::minutes(5), now), "Just now");
    }
}
