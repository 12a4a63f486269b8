use beesight_types::User;
use leptos::prelude::*;

use crate::{error_text, spawn_local};

#[server]
async fn get_users() -> Result<Vec<User>, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .users()
        .list()
        .await
        .map_err(|e| fail(e, "Could not load users"))
}

#[component]
pub fn UserListPage() -> impl IntoView {
    let (users, setUsers) = signal(Option::<Result<Vec<User>, String>>::None);

    spawn_local(async move {
        let result = get_users().await.map_err(error_text);
        setUsers.set(Some(result));
    });

    view! {
        <div class="page-header">
            <h1>"Users"</h1>
            <a href="/users/new" class="btn btn-primary">"+ Register"</a>
        </div>

        {move || match users.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => view! { <p class="login-error">{e}</p> }.into_any(),
            Some(Ok(list)) if list.is_empty() => view! { <p class="empty">"No users."</p> }.into_any(),
            Some(Ok(list)) => {
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Name"</th>
                                <th>"Email"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|user| {
                                    view! {
                                        <tr>
                                            <td>{user.user_id}</td>
                                            <td>{user.name}</td>
                                            <td>{user.email}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
    }
}
