use reqwest::multipart::{Form, Part};

use super::Ack;
use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::{Complaint, ComplaintStats, ComplaintUpdate, Paginated};
use crate::params::QueryParams;
use crate::validation::ComplaintForm;

pub struct ComplaintsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ComplaintsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Paginated list; recognised params are `page`, `limit`, `search`, `status`.
    pub async fn get_all(&self, params: &QueryParams) -> Result<Option<Paginated<Complaint>>> {
        self.client.request_as(&params.append_to("/complaints"), RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Option<Complaint>> {
        self.client.request_as(&format!("/complaints/{}", id), RequestOptions::get()).await
    }

    /// Submit a complaint as multipart form data. The form is validated first (required
    /// fields, evidence size ceiling); a rejected form never reaches the network.
    pub async fn create(&self, form: ComplaintForm) -> Result<Option<Complaint>> {
        form.validate(self.client.config().max_upload_size)?;
        let mut multipart = Form::new()
            .text("category_id", form.category_id.to_string())
            .text("title", form.title)
            .text("description", form.description);
        if let Some(ev) = form.evidence {
            let mut part = Part::bytes(ev.bytes).file_name(ev.file_name);
            if let Some(ct) = ev.content_type.as_deref() {
                part = part.mime_str(ct)?;
            }
            multipart = multipart.part("evidence", part);
        }
        self.client.request_as("/complaints", RequestOptions::multipart(multipart)).await
    }

    pub async fn update(&self, id: u64, fields: &ComplaintUpdate) -> Result<Option<Complaint>> {
        let body = serde_json::to_value(fields)?;
        self.client.request_as(&format!("/complaints/{}", id), RequestOptions::put(body)).await
    }

    pub async fn delete(&self, id: u64) -> Result<Option<Ack>> {
        self.client.request_as(&format!("/complaints/{}", id), RequestOptions::delete()).await
    }

    /// Counts by status; scoped to the caller's own complaints for students.
    pub async fn get_stats(&self) -> Result<Option<ComplaintStats>> {
        self.client.request_as("/complaints/stats", RequestOptions::get()).await
    }
}
