use beesight_types::{User, UserForm};
use reqwest::Method;

use crate::{ApiClient, Result};

pub struct Users<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Users<'_> {
    pub async fn list(&self) -> Result<Vec<User>> {
        self.client
            .data(self.client.request(Method::GET, "/users"))
            .await
    }

    pub async fn create(&self, form: &UserForm) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::POST, "/users").json(form))
            .await
    }
}
