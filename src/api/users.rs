use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::{NewUser, Paginated, User, UserStats};
use crate::params::QueryParams;
use crate::validation::validate_new_user;

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Paginated list; recognised params are `page`, `limit`, `role`, `search`.
    pub async fn get_all(&self, params: &QueryParams) -> Result<Option<Paginated<User>>> {
        self.client.request_as(&params.append_to("/users"), RequestOptions::get()).await
    }

    pub async fn get_stats(&self) -> Result<Option<UserStats>> {
        self.client.request_as("/users/stats", RequestOptions::get()).await
    }

    /// Admin only. Required fields, password length and email shape are checked first.
    pub async fn create(&self, user: &NewUser) -> Result<Option<User>> {
        validate_new_user(user)?;
        let body = serde_json::to_value(user)?;
        self.client.request_as("/users", RequestOptions::post(body)).await
    }
}
