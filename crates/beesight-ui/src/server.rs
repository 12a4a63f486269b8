//! Server-side glue shared by the server functions: resolving the caller's
//! backend client from the session cookie and turning client errors into
//! what the screens expect.

use axum_extra::extract::CookieJar;
use beesight_api::middleware::auth::AppState;
use beesight_api::session::cleared_session_cookie;
use beesight_client::{ApiClient, ClientError};
use beesight_types::ActionReport;
use http::header::{HeaderValue, SET_COOKIE};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use tracing::warn;

pub fn state() -> Result<AppState, ServerFnError> {
    use_context::<AppState>().ok_or_else(|| ServerFnError::new("console state unavailable"))
}

/// Backend client carrying the caller's bearer token. A request without a
/// session is treated like a backend 401.
pub async fn backend() -> Result<ApiClient, ServerFnError> {
    let state = state()?;
    let jar: CookieJar = leptos_axum::extract().await?;
    match state.client_for(&jar) {
        Some(client) => Ok(client),
        None => Err(sign_out(&state)),
    }
}

/// Drops the session cookie and redirects to the login page.
pub fn sign_out(state: &AppState) -> ServerFnError {
    if let Some(responseOptions) = use_context::<ResponseOptions>() {
        if let Ok(value) = HeaderValue::from_str(&cleared_session_cookie(&state.session)) {
            responseOptions.insert_header(SET_COOKIE, value);
        }
    }
    leptos_axum::redirect("/login");
    ServerFnError::new("Your session has expired. Please sign in again.")
}

/// Maps a failed backend call to the string the screen renders. A 401 ends
/// the session.
pub fn fail(err: ClientError, fallback: &str) -> ServerFnError {
    if err.is_unauthorized() {
        if let Ok(state) = state() {
            return sign_out(&state);
        }
    }
    warn!("{fallback}: {err}");
    ServerFnError::new(err.user_message(fallback))
}

/// Wraps the result of a write. Rejections the form can explain (a message
/// or field errors from the backend) come back as data, the rest as errors.
pub fn report(
    result: Result<Option<String>, ClientError>,
    success: &str,
    fallback: &str,
) -> Result<ActionReport, ServerFnError> {
    match result {
        Ok(message) => Ok(ActionReport::ok(message.unwrap_or_else(|| success.to_string()))),
        Err(err @ ClientError::Rejected { .. }) => {
            let errors = err.field_errors().cloned().unwrap_or_default();
            Ok(ActionReport::rejected(Some(err.user_message(fallback)), errors))
        }
        Err(err) if err.field_errors().is_some() => {
            let errors = err.field_errors().cloned().unwrap_or_default();
            Ok(ActionReport::rejected(Some(err.user_message(fallback)), errors))
        }
        Err(err) => Err(fail(err, fallback)),
    }
}

#[cfg(test)]
mod tests {
    use beesight_api::session::SessionConfig;
    use beesight_client::ClientConfig;
    use beesight_types::ValidationErrors;

    use super::*;

    fn app_state() -> AppState {
        AppState {
            backend: ApiClient::new(&ClientConfig::default()).unwrap(),
            session: SessionConfig {
                secure: false,
                max_age_secs: 60,
            },
            config_path: "test.toml".into(),
        }
    }

    /// Runs `f` the way a server function runs: with the console state and a
    /// response to write headers into.
    fn in_request<R>(f: impl FnOnce() -> R) -> (R, ResponseOptions) {
        let owner = Owner::new();
        let responseOptions = ResponseOptions::default();
        let result = owner.with(|| {
            provide_context(app_state());
            provide_context(responseOptions.clone());
            f()
        });
        (result, responseOptions)
    }

    fn set_cookie(responseOptions: &ResponseOptions) -> Option<String> {
        responseOptions
            .0
            .read()
            .headers
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }

    fn name_taken() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name already taken");
        errors
    }

    #[test]
    fn unauthorized_clears_the_session_cookie() {
        let (err, responseOptions) = in_request(|| fail(ClientError::Unauthorized, "Could not load"));

        assert!(err.to_string().contains("session has expired"));
        let cookie = set_cookie(&responseOptions).unwrap();
        assert!(cookie.starts_with("session_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn other_failures_keep_the_session() {
        let (err, responseOptions) = in_request(|| {
            fail(
                ClientError::Status {
                    status: 500,
                    message: None,
                    errors: None,
                },
                "Could not load projects",
            )
        });

        assert!(err.to_string().contains("Could not load projects"));
        assert!(set_cookie(&responseOptions).is_none());
    }

    #[test]
    fn rejected_write_becomes_a_report() {
        let (result, _) = in_request(|| {
            report(
                Err(ClientError::Rejected {
                    message: Some("Invalid input".into()),
                    errors: Some(name_taken()),
                }),
                "Saved",
                "Save failed",
            )
        });

        let report = result.unwrap();
        assert!(!report.success);
        assert_eq!(report.message.as_deref(), Some("Invalid input"));
        assert_eq!(report.errors.first("name"), Some("Name already taken"));
    }

    #[test]
    fn unprocessable_write_becomes_a_report() {
        let (result, _) = in_request(|| {
            report(
                Err(ClientError::Status {
                    status: 422,
                    message: None,
                    errors: Some(name_taken()),
                }),
                "Saved",
                "Save failed",
            )
        });

        let report = result.unwrap();
        assert!(!report.success);
        assert_eq!(report.message.as_deref(), Some("Save failed (status: 422)"));
        assert_eq!(report.errors.first("name"), Some("Name already taken"));
    }

    #[test]
    fn server_error_on_write_is_an_error() {
        let (result, responseOptions) = in_request(|| {
            report(
                Err(ClientError::Status {
                    status: 500,
                    message: None,
                    errors: None,
                }),
                "Saved",
                "Save failed",
            )
        });

        assert!(result.unwrap_err().to_string().contains("Save failed"));
        assert!(set_cookie(&responseOptions).is_none());
    }

    #[test]
    fn successful_write_uses_backend_message() {
        let (result, _) = in_request(|| report(Ok(Some("Created".into())), "Saved", "Save failed"));
        let saved = result.unwrap();
        assert!(saved.success);
        assert_eq!(saved.message.as_deref(), Some("Created"));

        let (result, _) = in_request(|| report(Ok(None), "Saved", "Save failed"));
        assert_eq!(result.unwrap().message.as_deref(), Some("Saved"));
    }
}
