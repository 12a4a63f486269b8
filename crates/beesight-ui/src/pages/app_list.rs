use beesight_types::{ActionReport, App};
use leptos::prelude::*;

use crate::components::badge::{status_class, Badge};
use crate::components::delete_button::DeleteButton;
use crate::components::toast::use_toasts;
use crate::{error_text, spawn_local};

#[server]
async fn get_apps() -> Result<Vec<App>, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .apps()
        .list()
        .await
        .map_err(|e| fail(e, "Could not load apps"))
}

#[server]
async fn delete_app(app_id: i64) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    let client = backend().await?;
    report(client.apps().delete(app_id).await, "App deleted", "Delete failed")
}

#[component]
pub fn AppListPage() -> impl IntoView {
    let toasts = use_toasts();
    let (apps, setApps) = signal(Option::<Result<Vec<App>, String>>::None);
    let (deleting, setDeleting) = signal(false);

    spawn_local(async move {
        let result = get_apps().await.map_err(error_text);
        setApps.set(Some(result));
    });

    let onDelete = move |appId: i64| {
        setDeleting.set(true);
        spawn_local(async move {
            match delete_app(appId).await {
                Ok(report) if report.success => {
                    setApps.update(|list| {
                        if let Some(Ok(list)) = list {
                            list.retain(|a| a.app_id != appId);
                        }
                    });
                    if let Some(t) = toasts {
                        t.success(report.message.unwrap_or_else(|| "App deleted".into()));
                    }
                }
                Ok(report) => {
                    if let Some(t) = toasts {
                        t.error(report.message.unwrap_or_else(|| "Delete failed".into()));
                    }
                }
                Err(e) => {
                    if let Some(t) = toasts {
                        t.error(error_text(e));
                    }
                }
            }
            setDeleting.set(false);
        });
    };

    view! {
        <div class="page-header">
            <h1>"Apps"</h1>
            <a href="/apps/new" class="btn btn-primary">"+ Register"</a>
        </div>

        {move || match apps.get() {
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
            Some(Ok(list)) if list.is_empty() => view! { <p class="empty">"No apps."</p> }.into_any(),
            Some(Ok(list)) => {
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Name"</th>
                                <th>"Version"</th>
                                <th>"Status"</th>
                                <th>"License IDs"</th>
                                <th>"Description"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|app| {
                                    let appId = app.app_id;
                                    view! {
                                        <tr>
                                            <td>{appId}</td>
                                            <td>{app.name.clone()}</td>
                                            <td>{app.version.clone()}</td>
                                            <td>
                                                <Badge class=status_class(&app.status) text=app.status.clone() />
                                            </td>
                                            <td>{app.license_ids_label().unwrap_or_else(|| "-".into())}</td>
                                            <td>{app.description.clone().unwrap_or_default()}</td>
                                            <td class="row-actions">
                                                <a class="btn btn-ghost btn-sm" href=format!("/apps/edit/{appId}")>
                                                    "Edit"
                                                </a>
                                                <DeleteButton
                                                    on_confirm=Callback::new(move |_| onDelete(appId))
                                                    busy=deleting
                                                />
                                            </td>
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
