use leptos::prelude::*;

#[server]
async fn login(login_id: String, password: String) -> Result<(), ServerFnError> {
    use beesight_api::session::session_cookie;
    use beesight_client::ClientError;
    use beesight_types::validate_login;
    use http::header::{HeaderValue, SET_COOKIE};
    use leptos_axum::ResponseOptions;

    if let Err(errors) = validate_login(&login_id, &password) {
        let message = errors
            .first("login_id")
            .or_else(|| errors.first("password"))
            .unwrap_or("Login ID and password are required");
        return Err(ServerFnError::new(message));
    }

    let state = crate::server::state()?;
    let response = match state.backend.auth().login(&login_id, &password).await {
        Ok(response) => response,
        Err(ClientError::Unauthorized) => {
            return Err(ServerFnError::new("Invalid login ID or password"));
        }
        Err(e) => {
            tracing::warn!("login for {login_id} failed: {e}");
            return Err(ServerFnError::new(e.user_message("Login failed")));
        }
    };

    let responseOptions = expect_context::<ResponseOptions>();
    responseOptions.insert_header(
        SET_COOKIE,
        HeaderValue::from_str(&session_cookie(&response.token, &state.session))
            .map_err(|e| ServerFnError::new(format!("cookie error: {e}")))?,
    );
    tracing::info!("{login_id} signed in");

    leptos_axum::redirect("/");

    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();
    let pending = loginAction.pending();

    let hasError = move || loginValue.get().is_some_and(|result| result.is_err());

    let errorMessage = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(crate::error_text)
            .unwrap_or_default()
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"B"</div>
                    <h1>"Beesight Console"</h1>
                    <p>"Sign in to manage projects and licenses"</p>
                </div>

                {move || {
                    hasError()
                        .then(|| {
                            view! { <div class="login-error">{errorMessage()}</div> }
                        })
                }}

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="login_id">"Login ID"</label>
                        <input
                            type="text"
                            id="login_id"
                            name="login_id"
                            autocomplete="username"
                            required
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </ActionForm>
            </div>
        </div>
    }
}
