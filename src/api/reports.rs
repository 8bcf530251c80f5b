use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::{CategoryReport, ReportStats, Trends};
use crate::params::QueryParams;

pub struct ReportsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Headline figures, optionally bounded by `start_date` / `end_date` (YYYY-MM-DD).
    pub async fn get_stats(&self, params: &QueryParams) -> Result<Option<ReportStats>> {
        self.client.request_as(&params.append_to("/reports/stats"), RequestOptions::get()).await
    }

    pub async fn get_categories(&self) -> Result<Option<CategoryReport>> {
        self.client.request_as("/reports/categories", RequestOptions::get()).await
    }

    /// Daily submitted/resolved counts; the server defaults to the last 30 days.
    pub async fn get_trends(&self, params: &QueryParams) -> Result<Option<Trends>> {
        self.client.request_as(&params.append_to("/reports/trends"), RequestOptions::get()).await
    }
}
