use beesight_types::{License, LicenseForm};
use reqwest::Method;

use crate::{ApiClient, Result};

pub struct Licenses<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Licenses<'_> {
    pub async fn list(&self) -> Result<Vec<License>> {
        self.client
            .data(self.client.request(Method::GET, "/licenses"))
            .await
    }

    pub async fn get(&self, license_id: i64) -> Result<License> {
        self.client
            .data(self.client.request(Method::GET, &format!("/licenses/{license_id}")))
            .await
    }

    pub async fn create(&self, form: &LicenseForm) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::POST, "/licenses").json(form))
            .await
    }

    pub async fn update(&self, license_id: i64, form: &LicenseForm) -> Result<Option<String>> {
        self.client
            .ack(
                self.client
                    .request(Method::PUT, &format!("/licenses/{license_id}"))
                    .json(form),
            )
            .await
    }

    pub async fn delete(&self, license_id: i64) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::DELETE, &format!("/licenses/{license_id}")))
            .await
    }
}
