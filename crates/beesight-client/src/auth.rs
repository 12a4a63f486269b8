use beesight_types::{CurrentUser, LoginRequest, LoginResponse};
use reqwest::Method;

use crate::{ApiClient, Result};

pub struct Auth<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Auth<'_> {
    /// `POST /login`; answers with a bare `{token}`.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            login_id: login_id.to_string(),
            password: password.to_string(),
        };
        self.client
            .plain(self.client.request(Method::POST, "/login").json(&body))
            .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.client
            .send(self.client.request(Method::POST, "/logout"))
            .await
            .map(|_| ())
    }

    pub async fn current_user(&self) -> Result<CurrentUser> {
        self.client
            .plain(self.client.request(Method::GET, "/user"))
            .await
    }
}
