use beesight_types::CurrentUser;
use leptos::prelude::*;

use crate::spawn_local;

#[server]
pub async fn get_current_user() -> Result<CurrentUser, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .auth()
        .current_user()
        .await
        .map_err(|e| fail(e, "Could not load the signed-in user"))
}

/// Top bar: product name, the signed-in operator and the logout button.
#[component]
pub fn Header() -> impl IntoView {
    let (user, setUser) = signal(Option::<CurrentUser>::None);

    spawn_local(async move {
        if let Ok(current) = get_current_user().await {
            setUser.set(Some(current));
        }
    });

    view! {
        <header class="top-bar">
            <a href="/" class="brand">
                <div class="brand-icon">"B"</div>
                <span class="brand-text">"Beesight TOP"</span>
            </a>
            <div class="top-bar-user">
                <span class="user-name">
                    {move || user.get().map(|u| u.display_name().to_string()).unwrap_or_default()}
                </span>
                <form method="post" action="/api/v1/auth/logout">
                    <button type="submit" class="btn btn-ghost btn-sm">"Log out"</button>
                </form>
            </div>
        </header>
    }
}
