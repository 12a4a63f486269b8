use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Router,
};
use axum_extra::extract::CookieJar;
use beesight_client::ApiClient;
use tracing::{info, warn};

use crate::session::{cleared_session_cookie, session_token, SessionConfig};

/// Shared by the axum routes and, as Leptos context, by the server functions.
#[derive(Clone)]
pub struct AppState {
    /// Token-less client; per-request clones carry the session token.
    pub backend: ApiClient,
    pub session: SessionConfig,
    pub config_path: String,
}

impl AppState {
    /// Backend client authorised with the caller's session, if it has one.
    pub fn client_for(&self, jar: &CookieJar) -> Option<ApiClient> {
        session_token(jar).map(|token| self.backend.with_token(token))
    }
}

pub fn auth_routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/api/v1/auth/logout", post(handle_logout))
}

/// Ends the backend session (best effort), drops the cookie and sends the
/// browser to the login page.
async fn handle_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(client) = state.client_for(&jar) {
        match client.auth().logout().await {
            Ok(()) => info!("backend session closed"),
            Err(e) => warn!("backend logout failed: {e}"),
        }
    }

    let mut response = Redirect::to("/login").into_response();
    if let Ok(value) = HeaderValue::from_str(&cleared_session_cookie(&state.session)) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Middleware for page routes: checks the session cookie, redirects to /login if missing.
pub async fn require_page_auth(
    State(_state): State<AppState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    // Exempt paths: login page, static assets, pkg files, api routes
    if is_public_path(path) {
        return next.run(request).await;
    }

    if session_token(&jar).is_none() {
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}

fn is_public_path(path: &str) -> bool {
    path == "/login"
        || path == "/favicon.svg"
        || path.starts_with("/pkg/")
        || path.starts_with("/api/")
        || path.starts_with("/assets/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get};
    use beesight_client::ClientConfig;
    use httpmock::prelude::*;
    use tower::ServiceExt;

    fn state(base_url: String) -> AppState {
        AppState {
            backend: ApiClient::new(&ClientConfig {
                base_url,
                ..Default::default()
            })
            .unwrap(),
            session: SessionConfig {
                secure: false,
                max_age_secs: 60,
            },
            config_path: "test.toml".into(),
        }
    }

    fn app(state: AppState) -> Router {
        let pages = Router::new()
            .route("/", get(|| async { "dashboard" }))
            .route("/login", get(|| async { "login" }))
            .route("/pkg/app.js", get(|| async { "js" }));

        pages
            .merge(crate::api_router(state.clone()))
            .layer(axum::middleware::from_fn_with_state(state, require_page_auth))
    }

    fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn pages_without_session_redirect_to_login() {
        let response = app(state("http://127.0.0.1:9".into()))
            .oneshot(get_request("/", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn pages_with_session_pass_through() {
        let response = app(state("http://127.0.0.1:9".into()))
            .oneshot(get_request("/", Some("session_token=tok")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_paths_skip_the_check() {
        let router = app(state("http://127.0.0.1:9".into()));
        for path in ["/login", "/pkg/app.js", "/api/v1/health"] {
            let response = router.clone().oneshot(get_request(path, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn logout_closes_backend_session_and_clears_cookie() {
        let server = MockServer::start();
        let logout = server.mock(|when, then| {
            when.method(POST)
                .path("/api/logout")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(serde_json::json!({"success": true}));
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/logout")
            .header(header::COOKIE, "session_token=tok")
            .body(Body::empty())
            .unwrap();
        let response = app(state(server.url("/api"))).oneshot(request).await.unwrap();

        logout.assert();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("session_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn logout_survives_backend_failure() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/logout")
            .header(header::COOKIE, "session_token=tok")
            .body(Body::empty())
            .unwrap();
        let response = app(state("http://127.0.0.1:9/api".into()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }
}
