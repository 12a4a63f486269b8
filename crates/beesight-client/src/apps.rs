use beesight_types::{App, AppForm};
use reqwest::Method;

use crate::{ApiClient, Result};

pub struct Apps<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Apps<'_> {
    pub async fn list(&self) -> Result<Vec<App>> {
        self.client
            .data(self.client.request(Method::GET, "/apps"))
            .await
    }

    pub async fn get(&self, app_id: i64) -> Result<App> {
        self.client
            .data(self.client.request(Method::GET, &format!("/apps/{app_id}")))
            .await
    }

    pub async fn create(&self, form: &AppForm) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::POST, "/apps").json(form))
            .await
    }

    pub async fn update(&self, app_id: i64, form: &AppForm) -> Result<Option<String>> {
        self.client
            .ack(
                self.client
                    .request(Method::PUT, &format!("/apps/{app_id}"))
                    .json(form),
            )
            .await
    }

    pub async fn delete(&self, app_id: i64) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::DELETE, &format!("/apps/{app_id}")))
            .await
    }
}
