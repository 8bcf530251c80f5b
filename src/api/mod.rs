//! Typed resource clients.
//! Each client is a thin facade over `ApiClient::request`: one domain operation, one HTTP
//! call. Every operation returns `Ok(None)` when the session expired mid-call (HTTP 401).
//! Writes never touch local state apart from the session; callers re-fetch afterwards.

mod announcements;
mod auth;
mod categories;
mod complaints;
mod notifications;
mod reports;
mod users;

pub use announcements::AnnouncementsApi;
pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use complaints::ComplaintsApi;
pub use notifications::NotificationsApi;
pub use reports::ReportsApi;
pub use users::UsersApi;

use serde::Deserialize;

use crate::http::ApiClient;

/// Acknowledgement body returned by deletes and bulk updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> { AuthApi::new(self) }
    pub fn complaints(&self) -> ComplaintsApi<'_> { ComplaintsApi::new(self) }
    pub fn categories(&self) -> CategoriesApi<'_> { CategoriesApi::new(self) }
    pub fn users(&self) -> UsersApi<'_> { UsersApi::new(self) }
    pub fn announcements(&self) -> AnnouncementsApi<'_> { AnnouncementsApi::new(self) }
    pub fn notifications(&self) -> NotificationsApi<'_> { NotificationsApi::new(self) }
    pub fn reports(&self) -> ReportsApi<'_> { ReportsApi::new(self) }
}
