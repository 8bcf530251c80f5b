//! Behaviour every authenticated page shares: the session guard, the navbar, the
//! notification panel and logout.

use tracing::warn;

use super::render::Fragment;
use crate::api::Ack;
use crate::config::LOGIN_PATH;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Announcement, Notification, NotificationType, Role, User};
use crate::params::QueryParams;

/// Who may view a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Any,
    Admin,
    Student,
}

impl Access {
    fn admits(&self, role: Option<Role>) -> bool {
        match self {
            Access::Any => true,
            Access::Admin => role == Some(Role::Admin),
            Access::Student => role != Some(Role::Admin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarModel {
    pub display_name: String,
    pub subtitle: String,
    pub initial: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPanel {
    pub items: Vec<Notification>,
    pub unread_count: u64,
}

impl NotificationPanel {
    /// `None` hides the badge, an empty string shows a plain dot.
    pub fn badge(&self) -> Option<String> {
        match self.unread_count {
            0 => None,
            n if n > 9 => Some("9+".to_string()),
            _ => Some(String::new()),
        }
    }
}

/// Where opening a notification leads.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationTarget {
    Page(String),
    Announcement(Announcement),
    Nothing,
    /// The server rejected the session; the login redirect has already happened.
    SessionExpired,
}

#[derive(Clone)]
pub struct PageShell {
    client: ApiClient,
    access: Access,
}

impl PageShell {
    pub fn new(client: ApiClient, access: Access) -> Self { Self { client, access } }

    pub fn client(&self) -> &ApiClient { &self.client }

    /// Returns the stored profile when the page may render. Otherwise redirects (to the
    /// login page without a token, to the user's own dashboard on a role mismatch).
    pub fn guard(&self) -> Option<User> {
        if self.client.session().get_token().is_none() {
            self.client.navigator().redirect(LOGIN_PATH);
            return None;
        }
        let user = self.client.session().get_user();
        if !self.access.admits(user.role) {
            let home = user.role.unwrap_or(Role::Student).dashboard_path();
            self.client.navigator().redirect(home);
            return None;
        }
        Some(user)
    }

    pub fn navbar(&self, user: &User) -> NavbarModel {
        let is_student_page = self.access == Access::Student || (self.access == Access::Any && !user.is_admin());
        let student_id = user.student_id.as_deref().filter(|s| !s.is_empty());
        let display_name = [user.name.as_str(), user.username.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(if is_student_page { "Student" } else { "Admin User" })
            .to_string();
        let subtitle = if is_student_page {
            format!("Student ID: {}", student_id.unwrap_or(&user.username))
        } else if let Some(sid) = student_id {
            sid.to_string()
        } else if user.is_admin() {
            "Super Admin".to_string()
        } else {
            "Administrator".to_string()
        };
        let initial = display_name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default();
        NavbarModel { display_name, subtitle, initial }
    }

    pub async fn load_notifications(&self) -> Result<Option<NotificationPanel>> {
        let params = QueryParams::new().limit(self.client.config().notification_limit);
        let list = self.client.notifications().get_all(&params).await?;
        Ok(list.map(|l| NotificationPanel { items: l.data, unread_count: l.unread_count }))
    }

    /// Mark the notification read, then resolve where it points. A failed mark-read or
    /// announcement fetch is logged and does not block navigation. An expired session
    /// ends the flow at the login redirect.
    pub async fn open_notification(&self, notification: &Notification) -> Result<NotificationTarget> {
        match self.client.notifications().mark_as_read(notification.id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(NotificationTarget::SessionExpired),
            Err(e) => warn!(target: "notifications", id = notification.id, error = %e, "mark as read failed"),
        }
        let Some(related) = notification.related_id.filter(|id| *id != 0) else {
            return Ok(NotificationTarget::Nothing);
        };
        match notification.kind {
            NotificationType::ComplaintUpdate | NotificationType::System => {
                let prefix = if self.access == Access::Student { "/student" } else { "/admin" };
                let path = format!("{}/complaint/{}", prefix, related);
                self.client.navigator().redirect(&path);
                Ok(NotificationTarget::Page(path))
            }
            NotificationType::Announcement => match self.client.announcements().get_by_id(related).await {
                Ok(Some(a)) => Ok(NotificationTarget::Announcement(a)),
                Ok(None) => Ok(NotificationTarget::SessionExpired),
                Err(e) => {
                    warn!(target: "notifications", id = related, error = %e, "announcement fetch failed");
                    Ok(NotificationTarget::Nothing)
                }
            },
            NotificationType::Other => Ok(NotificationTarget::Nothing),
        }
    }

    pub async fn mark_all_read(&self) -> Result<Option<Ack>> { self.client.notifications().mark_all_as_read().await }

    pub async fn pending_count(&self) -> Result<Option<u64>> {
        Ok(self.client.complaints().get_stats().await?.map(|s| s.pending))
    }

    pub fn logout(&self) -> Result<()> { self.client.auth().logout() }
}

/// Sidebar `pendingCount` badge; hidden when nothing is pending.
pub fn pending_badge(count: u64) -> Option<Fragment> {
    (count > 0).then(|| Fragment::text("pendingCount", &count.to_string()))
}
