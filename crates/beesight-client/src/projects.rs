use beesight_types::{AuthHistory, ListQuery, Page, Project, ProjectDetail, ProjectForm, Terminal};
use reqwest::Method;

use crate::{ApiClient, Result};

pub struct Projects<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Projects<'_> {
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Project>> {
        self.client
            .page(self.client.request(Method::GET, "/projects").query(query))
            .await
    }

    pub async fn get(&self, project_id: i64) -> Result<ProjectDetail> {
        self.client
            .data(self.client.request(Method::GET, &format!("/projects/{project_id}")))
            .await
    }

    pub async fn create(&self, form: &ProjectForm) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::POST, "/projects").json(form))
            .await
    }

    pub async fn update(&self, project_id: i64, form: &ProjectForm) -> Result<Option<String>> {
        self.client
            .ack(
                self.client
                    .request(Method::PUT, &format!("/projects/{project_id}"))
                    .json(form),
            )
            .await
    }

    pub async fn delete(&self, project_id: i64) -> Result<Option<String>> {
        self.client
            .ack(self.client.request(Method::DELETE, &format!("/projects/{project_id}")))
            .await
    }

    pub async fn terminals(&self, project_id: i64, page: u32) -> Result<Page<Terminal>> {
        self.client
            .page(
                self.client
                    .request(Method::GET, &format!("/projects/{project_id}/terminals"))
                    .query(&ListQuery::page(page)),
            )
            .await
    }

    pub async fn auth_histories(&self, project_id: i64, page: u32) -> Result<Page<AuthHistory>> {
        self.client
            .page(
                self.client
                    .request(Method::GET, &format!("/projects/{project_id}/auth/histories"))
                    .query(&ListQuery::page(page)),
            )
            .await
    }
}
