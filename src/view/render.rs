use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::escape::escape_html;
use super::format::{format_date, notification_icon, relative_time, status_badge_class, status_label};
use crate::models::{Announcement, AnnouncementStatus, Category, Complaint, ComplaintStats, Notification, Paginated, Role, User};

/// Markup destined for the element with id `slot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub slot: &'static str,
    pub html: String,
}

impl Fragment {
    pub fn new(slot: &'static str, html: impl Into<String>) -> Self { Self { slot, html: html.into() } }

    /// Plain text content; escaped like any other dynamic value.
    pub fn text(slot: &'static str, text: &str) -> Self { Self::new(slot, escape_html(text)) }
}

/// Fragments keyed by slot. Inserting into an occupied slot replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    slots: BTreeMap<&'static str, String>,
}

impl ViewModel {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, fragment: Fragment) { self.slots.insert(fragment.slot, fragment.html); }

    pub fn extend(&mut self, fragments: impl IntoIterator<Item = Fragment>) {
        for f in fragments { self.insert(f); }
    }

    pub fn get(&self, slot: &str) -> Option<&str> { self.slots.get(slot).map(String::as_str) }

    pub fn slots(&self) -> impl Iterator<Item = (&'static str, &str)> { self.slots.iter().map(|(k, v)| (*k, v.as_str())) }

    pub fn len(&self) -> usize { self.slots.len() }
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }
}

fn empty_row(colspan: u8, message: &str) -> String {
    format!(
        r#"<tr><td colspan="{}" class="px-6 py-8 text-center text-slate-500 dark:text-slate-400">{}</td></tr>"#,
        colspan,
        escape_html(message)
    )
}

fn or_na(s: &str) -> &str { if s.is_empty() { "N/A" } else { s } }

fn initial(name: &str) -> String { name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default() }

fn date_cell(at: Option<DateTime<Utc>>) -> String { at.map(format_date).unwrap_or_else(|| "N/A".to_string()) }

fn status_badge(status: crate::models::ComplaintStatus) -> String {
    format!(
        r#"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {}">{}</span>"#,
        status_badge_class(status),
        status_label(status)
    )
}

fn announcement_badge(status: AnnouncementStatus) -> String {
    let (class, label) = match status {
        AnnouncementStatus::Published => ("bg-green-100 text-green-800 dark:bg-green-900/30 dark:text-green-300", "Published"),
        AnnouncementStatus::Draft => ("bg-slate-100 text-slate-800 dark:bg-slate-800 dark:text-slate-300", "Draft"),
        AnnouncementStatus::Archived => ("bg-amber-100 text-amber-800 dark:bg-amber-900/30 dark:text-amber-300", "Archived"),
    };
    format!(r#"<span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {}">{}</span>"#, class, label)
}

/// Rows for `complaintsTableBody`.
pub fn complaint_rows(complaints: &[Complaint]) -> Fragment {
    if complaints.is_empty() {
        return Fragment::new("complaintsTableBody", empty_row(7, "No complaints found"));
    }
    let mut html = String::new();
    for c in complaints {
        let ticket = if c.ticket_id.is_empty() { c.id.to_string() } else { c.ticket_id.clone() };
        let student = c.user.as_ref().map(|u| u.name.as_str()).filter(|n| !n.is_empty()).unwrap_or("Unknown");
        let student_id = c.user.as_ref().and_then(|u| u.student_id.as_deref()).filter(|s| !s.is_empty());
        let category = c.category.as_ref().map(|cat| cat.name.as_str()).unwrap_or("");
        let _ = write!(
            html,
            r##"<tr data-id="{id}"><td class="font-mono text-xs">#{ticket}</td><td class="font-medium">{title}</td><td><div class="flex items-center gap-2"><div class="size-6 rounded-full">{initial}</div><div class="flex flex-col"><span class="text-sm">{student}</span>{sid}</div></div></td><td><span class="rounded-full text-xs">{category}</span></td><td>{date}</td><td>{badge}</td></tr>"##,
            id = c.id,
            ticket = escape_html(&ticket),
            title = escape_html(or_na(&c.title)),
            initial = escape_html(&initial(student)),
            student = escape_html(student),
            sid = student_id.map(|s| format!(r#"<span class="text-xs">({})</span>"#, escape_html(s))).unwrap_or_default(),
            category = escape_html(or_na(category)),
            date = date_cell(c.created_at),
            badge = status_badge(c.status),
        );
    }
    Fragment::new("complaintsTableBody", html)
}

/// Rows for `usersTableBody`.
pub fn user_rows(users: &[User]) -> Fragment {
    if users.is_empty() {
        return Fragment::new("usersTableBody", empty_row(7, "No users found"));
    }
    let mut html = String::new();
    for u in users {
        let (badge, label) = if u.role == Some(Role::Admin) {
            ("bg-purple-100 text-purple-800 dark:bg-purple-900/30 dark:text-purple-300", "Admin")
        } else {
            ("bg-green-100 text-green-800 dark:bg-green-900/30 dark:text-green-300", "Student")
        };
        let _ = write!(
            html,
            r##"<tr data-id="{id}"><td class="font-mono text-xs">#{id}</td><td class="font-medium">{name}</td><td>{username}</td><td>{sid}</td><td>{email}</td><td><span class="rounded-full text-xs font-medium {badge}">{label}</span></td><td>{date}</td></tr>"##,
            id = u.id,
            name = escape_html(or_na(&u.name)),
            username = escape_html(&u.username),
            sid = escape_html(or_na(u.student_id.as_deref().unwrap_or(""))),
            email = escape_html(or_na(u.email.as_deref().unwrap_or(""))),
            badge = badge,
            label = label,
            date = date_cell(u.created_at),
        );
    }
    Fragment::new("usersTableBody", html)
}

const PREVIEW_CHARS: usize = 50;

/// Rows for `announcementsTableBody`; content is cut to a short preview.
pub fn announcement_rows(announcements: &[Announcement]) -> Fragment {
    if announcements.is_empty() {
        return Fragment::new("announcementsTableBody", empty_row(6, "No announcements found."));
    }
    let mut html = String::new();
    for a in announcements {
        let preview = if a.content.chars().count() > PREVIEW_CHARS {
            format!("{}...", a.content.chars().take(PREVIEW_CHARS).collect::<String>())
        } else {
            a.content.clone()
        };
        let author = a
            .author
            .as_ref()
            .map(|u| if u.name.is_empty() { u.username.as_str() } else { u.name.as_str() })
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown");
        let _ = write!(
            html,
            r#"<tr data-id="{id}"><td class="font-medium">{title}</td><td>{preview}</td><td>{date}</td><td><div class="flex items-center gap-2"><div class="size-8 rounded-full">{initial}</div><span>{author}</span></div></td><td>{badge}</td></tr>"#,
            id = a.id,
            title = escape_html(&a.title),
            preview = escape_html(&preview),
            date = date_cell(a.created_at),
            initial = escape_html(&initial(author)),
            author = escape_html(author),
            badge = announcement_badge(a.status),
        );
    }
    Fragment::new("announcementsTableBody", html)
}

/// Items for `notificationList`, unread ones highlighted.
pub fn notification_list(notifications: &[Notification], now: DateTime<Utc>) -> Fragment {
    if notifications.is_empty() {
        return Fragment::new(
            "notificationList",
            r#"<div class="text-center text-slate-500 dark:text-slate-400 py-8">No notifications</div>"#,
        );
    }
    let mut html = String::new();
    for n in notifications {
        let (icon, color) = notification_icon(n.kind);
        let unread = !n.is_read;
        let _ = write!(
            html,
            r#"<div class="p-3 rounded-lg cursor-pointer{bg}" data-id="{id}"><div class="flex items-start gap-3"><div class="size-10 rounded-full {color}"><span class="material-symbols-outlined text-white">{icon}</span></div><div class="flex-1 min-w-0"><h4 class="text-sm{bold}">{title}</h4>{dot}<p class="text-xs line-clamp-2">{message}</p><p class="text-xs">{time}</p></div></div></div>"#,
            bg = if unread { " bg-blue-50 dark:bg-blue-900/10" } else { "" },
            id = n.id,
            color = color,
            icon = icon,
            bold = if unread { " font-bold" } else { "" },
            title = escape_html(&n.title),
            dot = if unread { r#"<span class="size-2 rounded-full bg-primary"></span>"# } else { "" },
            message = escape_html(&n.message),
            time = n.created_at.map(|at| relative_time(at, now)).unwrap_or_default(),
        );
    }
    Fragment::new("notificationList", html)
}

/// `paginationInfo` text, e.g. `Showing 11 to 20 of 25 users`.
pub fn pagination_info<T>(page: &Paginated<T>, noun: &str) -> Fragment {
    Fragment::text("paginationInfo", &format!("Showing {} {}", page.display_range(), noun))
}

/// `<option>`s for the `category` select, keeping a disabled placeholder first.
pub fn category_options(categories: &[Category]) -> Fragment {
    let mut html = String::from(r#"<option value="" disabled selected>Select a category</option>"#);
    for c in categories {
        let _ = write!(html, r#"<option value="{}">{}</option>"#, c.id, escape_html(&c.name));
    }
    Fragment::new("category", html)
}

/// Dashboard counters plus the sidebar `pendingCount` badge.
pub fn complaint_stat_cards(stats: &ComplaintStats) -> Vec<Fragment> {
    vec![
        Fragment::text("totalComplaints", &stats.total.to_string()),
        Fragment::text("pendingComplaints", &stats.pending.to_string()),
        Fragment::text("inProcessComplaints", &stats.in_process.to_string()),
        Fragment::text("completedComplaints", &stats.completed.to_string()),
        Fragment::text("pendingCount", &stats.pending.to_string()),
    ]
}
