use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::auth::AppState;

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/api/v1/health", get(get_health))
}

/// Liveness probe. Reports where the console forwards to and which config
/// file it started from; never calls the backend.
async fn get_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend": state.backend.base_url(),
        "config": state.config_path,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use beesight_client::{ApiClient, ClientConfig};
    use tower::ServiceExt;

    use crate::middleware::auth::AppState;
    use crate::session::SessionConfig;

    #[tokio::test]
    async fn health_reports_backend_and_config() {
        let state = AppState {
            backend: ApiClient::new(&ClientConfig {
                base_url: "http://backend:8585/api".into(),
                ..Default::default()
            })
            .unwrap(),
            session: SessionConfig::default(),
            config_path: "console.toml".into(),
        };

        let response = crate::api_router(state)
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["backend"], "http://backend:8585/api");
        assert_eq!(json["config"], "console.toml");
    }
}
