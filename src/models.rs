//! Typed resource records returned by the backend.
//! Fields the server may omit default rather than fail, and unknown fields are ignored,
//! so older or newer backends still deserialize.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self { Role::Admin => "admin", Role::Student => "student" }
    }

    /// Landing page for a signed-in user of this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self { Role::Admin => "/admin/dashboard", Role::Student => "/student/dashboard" }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// User profile. `User::default()` is the empty record returned when no profile is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Preloaded-but-empty associations arrive with `"role": ""`; treat anything unknown as absent.
fn lenient_role<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Role>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.as_deref().and_then(Role::parse))
}

impl User {
    pub fn is_empty(&self) -> bool { self.id == 0 && self.username.is_empty() && self.role.is_none() }
    pub fn is_admin(&self) -> bool { self.role == Some(Role::Admin) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InProcess,
    Completed,
    Rejected,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 4] = [ComplaintStatus::Pending, ComplaintStatus::InProcess, ComplaintStatus::Completed, ComplaintStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::InProcess => "in_process",
            ComplaintStatus::Completed => "completed",
            ComplaintStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl Display for ComplaintStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: u64,
    #[serde(default)]
    pub ticket_id: String,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub category_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub admin_response: String,
    #[serde(default)]
    pub evidence_path: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial complaint update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplaintUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementStatus {
    Draft,
    Published,
    Archived,
}

impl AnnouncementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "draft",
            AnnouncementStatus::Published => "published",
            AnnouncementStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(AnnouncementStatus::Draft),
            "published" => Some(AnnouncementStatus::Published),
            "archived" => Some(AnnouncementStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    pub status: AnnouncementStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementInput {
    pub title: String,
    pub content: String,
    pub status: AnnouncementStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ComplaintUpdate,
    Announcement,
    System,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default = "other_type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub related_id: Option<u64>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn other_type() -> NotificationType { NotificationType::Other }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Notification>,
    #[serde(default)]
    pub unread_count: u64,
}

/// Pagination envelope shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 { 1 }

/// Empty lists sometimes arrive as `null`.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub in_process: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub rejected: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub admin: u64,
    #[serde(default)]
    pub student: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub student_id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Role from the top-level field, falling back to the embedded profile.
    pub fn effective_role(&self) -> Option<Role> { self.role.or(self.user.role) }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub change: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionTime {
    #[serde(default)]
    pub days: f64,
    #[serde(default)]
    pub change: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    #[serde(default)]
    pub total: StatValue,
    #[serde(default)]
    pub pending: StatValue,
    #[serde(default)]
    pub resolved: StatValue,
    #[serde(default)]
    pub avg_resolution_time: ResolutionTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    #[serde(default)]
    pub category_id: u64,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    #[serde(default)]
    pub categories: Vec<CategoryShare>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trends {
    #[serde(default)]
    pub submissions: Vec<DailyCount>,
    #[serde(default)]
    pub resolved: Vec<DailyCount>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_from_backend_shape() {
        let body = json!({
            "token": "abc",
            "user": {"id": 1, "username": "admin", "student_id": "", "email": "a@campus.ac.id", "name": "Admin", "role": "admin"},
            "role": "admin",
            "message": "Login successful"
        });
        let lr: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(lr.token, "abc");
        assert_eq!(lr.effective_role(), Some(Role::Admin));
        assert!(lr.user.is_admin());
    }

    #[test]
    fn complaint_tolerates_missing_optional_fields() {
        let c: Complaint = serde_json::from_value(json!({
            "id": 7, "ticket_id": "TKT-0007", "title": "Broken AC", "status": "in_process",
            "created_at": "2024-03-01T08:30:00+07:00"
        })).unwrap();
        assert_eq!(c.status, ComplaintStatus::InProcess);
        assert!(c.category.is_none());
        assert_eq!(c.created_at.unwrap().to_rfc3339(), "2024-03-01T01:30:00+00:00");
    }

    #[test]
    fn zero_valued_author_deserializes() {
        let a: Announcement = serde_json::from_value(json!({
            "id": 3, "title": "Exam week", "content": "...", "status": "published",
            "author": {"id": 0, "username": "", "role": "", "created_at": "0001-01-01T00:00:00Z"}
        })).unwrap();
        let author = a.author.unwrap();
        assert!(author.role.is_none());
        assert!(author.is_empty());
    }

    #[test]
    fn null_page_data_is_empty() {
        let p: Paginated<Complaint> = serde_json::from_value(json!({"data": null, "page": 1, "limit": 10, "total": 0, "total_pages": 0})).unwrap();
        assert!(p.data.is_empty());
    }

    #[test]
    fn unknown_notification_type_maps_to_other() {
        let n: Notification = serde_json::from_value(json!({"id": 1, "title": "t", "message": "m", "type": "reminder"})).unwrap();
        assert_eq!(n.kind, NotificationType::Other);
        assert!(!n.is_read);
    }

    #[test]
    fn complaint_update_skips_absent_fields() {
        let u = ComplaintUpdate { status: Some(ComplaintStatus::Completed), admin_response: None };
        assert_eq!(serde_json::to_value(&u).unwrap(), json!({"status": "completed"}));
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(ComplaintStatus::parse("IN_PROCESS"), Some(ComplaintStatus::InProcess));
        assert_eq!(ComplaintStatus::parse("unknown"), None);
        assert_eq!(Role::parse("Student"), Some(Role::Student));
    }
}
