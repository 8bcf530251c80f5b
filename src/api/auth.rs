use serde_json::json;
use tracing::{info, warn};

use crate::config::LOGIN_PATH;
use crate::error::Result;
use crate::http::{ApiClient, RequestOptions};
use crate::models::{LoginResponse, User};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Authenticate and persist token + profile; both are stored or neither is. A 401 from the server (bad credentials)
    /// takes the usual expired-session path and yields `None`.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<LoginResponse>> {
        let body = json!({"username": username, "password": password});
        let resp: Option<LoginResponse> = self.client.request_as("/login", RequestOptions::post(body)).await?;
        if let Some(r) = &resp {
            let session = self.client.session();
            session.set_token(&r.token)?;
            if let Err(e) = session.set_user(&r.user) {
                if let Err(undo) = session.remove_token() {
                    warn!(target: "auth", error = %undo, "could not roll back token after failed login");
                }
                return Err(e);
            }
            info!(target: "auth", user = %r.user.username, role = ?r.effective_role(), "logged in");
        }
        Ok(resp)
    }

    /// Clear the local session and go to the login page. No server call is made.
    pub fn logout(&self) -> Result<()> {
        self.client.session().clear()?;
        info!(target: "auth", "logged out");
        self.client.navigator().redirect(LOGIN_PATH);
        Ok(())
    }

    pub async fn get_profile(&self) -> Result<Option<User>> {
        self.client.request_as("/profile", RequestOptions::get()).await
    }
}
