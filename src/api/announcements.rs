use super::Ack;
use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::{Announcement, AnnouncementInput, Paginated};
use crate::params::QueryParams;
use crate::validation::validate_announcement;

pub struct AnnouncementsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnnouncementsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Paginated list; recognised params are `page`, `limit`, `status`, `search`.
    pub async fn get_all(&self, params: &QueryParams) -> Result<Option<Paginated<Announcement>>> {
        self.client.request_as(&params.append_to("/announcements"), RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Option<Announcement>> {
        self.client.request_as(&format!("/announcements/{}", id), RequestOptions::get()).await
    }

    pub async fn create(&self, input: &AnnouncementInput) -> Result<Option<Announcement>> {
        validate_announcement(input)?;
        let body = serde_json::to_value(input)?;
        self.client.request_as("/announcements", RequestOptions::post(body)).await
    }

    pub async fn update(&self, id: u64, input: &AnnouncementInput) -> Result<Option<Announcement>> {
        validate_announcement(input)?;
        let body = serde_json::to_value(input)?;
        self.client.request_as(&format!("/announcements/{}", id), RequestOptions::put(body)).await
    }

    pub async fn delete(&self, id: u64) -> Result<Option<Ack>> {
        self.client.request_as(&format!("/announcements/{}", id), RequestOptions::delete()).await
    }
}
