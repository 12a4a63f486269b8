pub mod apps;
pub mod auth;
pub mod error;
pub mod histories;
pub mod licenses;
pub mod projects;
pub mod users;

use std::collections::BTreeMap;
use std::time::Duration;

use beesight_types::{Envelope, Page, ValidationErrors};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

pub use error::{ClientError, Result};

/// Backend connection settings, read from the `[backend]` config section.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra headers sent with every request (tunnels and proxies in front
    /// of the backend sometimes want one).
    pub headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8585/api".into(),
            timeout_secs: 15,
            headers: BTreeMap::new(),
        }
    }
}

/// REST client for the licensing backend. Cheap to clone; clones share the
/// connection pool. A clone made with [`ApiClient::with_token`] sends
/// `Authorization: Bearer <token>` on every request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::Config {
                message: format!("invalid header name {name}: {e}"),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| ClientError::Config {
                message: format!("invalid value for header {name}: {e}"),
            })?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn auth(&self) -> auth::Auth<'_> {
        auth::Auth { client: self }
    }

    pub fn projects(&self) -> projects::Projects<'_> {
        projects::Projects { client: self }
    }

    pub fn licenses(&self) -> licenses::Licenses<'_> {
        licenses::Licenses { client: self }
    }

    pub fn apps(&self) -> apps::Apps<'_> {
        apps::Apps { client: self }
    }

    pub fn users(&self) -> users::Users<'_> {
        users::Users { client: self }
    }

    pub fn histories(&self) -> histories::Histories<'_> {
        histories::Histories { client: self }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx response. 401 maps
    /// to [`ClientError::Unauthorized`]; other failures carry whatever
    /// envelope the backend sent.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "backend request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, %path, "backend answered 401");
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let (message, errors) = failure_details(&body);
            warn!(%method, %path, status = status.as_u16(), "backend request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
                errors,
            });
        }

        Ok(body)
    }

    /// Decodes an enveloped response, turning `success: false` into
    /// [`ClientError::Rejected`].
    pub(crate) async fn envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>> {
        let body = self.send(builder).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        if !envelope.success {
            return Err(ClientError::Rejected {
                message: envelope.message,
                errors: envelope.errors,
            });
        }
        Ok(envelope)
    }

    pub(crate) async fn data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.envelope::<T>(builder)
            .await?
            .data
            .ok_or(ClientError::MissingData)
    }

    pub(crate) async fn page<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Page<T>> {
        let envelope = self.envelope::<Vec<T>>(builder).await?;
        Ok(Page {
            items: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// For writes: returns the backend's confirmation message, if any.
    pub(crate) async fn ack(&self, builder: RequestBuilder) -> Result<Option<String>> {
        let envelope = self.envelope::<serde_json::Value>(builder).await?;
        Ok(envelope.message)
    }

    /// For the few endpoints that answer without an envelope.
    pub(crate) async fn plain<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send(builder).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Message and field errors from a failed response. A body that is not a
/// well-formed envelope still gives up its `message` when it has one.
fn failure_details(body: &[u8]) -> (Option<String>, Option<ValidationErrors>) {
    if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        return (envelope.message, envelope.errors);
    }
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned));
    (message, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised() {
        let client = ApiClient::new(&ClientConfig {
            base_url: "http://backend/api/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://backend/api");
        assert!(!client.has_token());
        assert!(client.with_token("t").has_token());
    }

    #[test]
    fn rejects_bad_header_names() {
        let mut headers = BTreeMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        let err = ApiClient::new(&ClientConfig {
            headers,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }

    #[test]
    fn failure_message_survives_malformed_envelope() {
        let (message, errors) = failure_details(br#"{"success":"no","message":"Server busy"}"#);
        assert_eq!(message.as_deref(), Some("Server busy"));
        assert!(errors.is_none());

        let (message, errors) = failure_details(br#"{"message":"Bad","errors":"name missing"}"#);
        assert_eq!(message.as_deref(), Some("Bad"));
        assert_eq!(errors.unwrap().first("_"), Some("name missing"));

        assert_eq!(failure_details(b"<html>502</html>"), (None, None));
    }
}
