use super::Ack;
use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::{Notification, NotificationList};
use crate::params::QueryParams;

pub struct NotificationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Newest first with the unread count; only `limit` is recognised.
    pub async fn get_all(&self, params: &QueryParams) -> Result<Option<NotificationList>> {
        self.client.request_as(&params.append_to("/notifications"), RequestOptions::get()).await
    }

    pub async fn mark_as_read(&self, id: u64) -> Result<Option<Notification>> {
        self.client.request_as(&format!("/notifications/{}/read", id), RequestOptions::put_empty()).await
    }

    pub async fn mark_all_as_read(&self) -> Result<Option<Ack>> {
        self.client.request_as("/notifications/read-all", RequestOptions::put_empty()).await
    }
}
