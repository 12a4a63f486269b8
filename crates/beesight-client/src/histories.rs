use beesight_types::{AuthHistory, ListQuery, Page};
use reqwest::Method;

use crate::{ApiClient, Result};

pub struct Histories<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Histories<'_> {
    /// `GET /auth/histories` with server-side search and paging.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<AuthHistory>> {
        self.client
            .page(self.client.request(Method::GET, "/auth/histories").query(query))
            .await
    }

    /// Newest `limit` records, for the dashboard.
    pub async fn latest(&self, limit: u32) -> Result<Vec<AuthHistory>> {
        let query = ListQuery::default().with_limit(limit);
        let mut page = self.list(&query).await?;
        page.items.truncate(limit as usize);
        Ok(page.items)
    }
}
