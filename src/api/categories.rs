use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::Category;

pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn get_all(&self) -> Result<Option<Vec<Category>>> {
        self.client.request_as("/categories", RequestOptions::get()).await
    }
}
