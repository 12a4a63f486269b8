use beesight_types::{AuthHistory, Page, ProjectDetail, Terminal, PROJECT_KINDS};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::badge::{action_class, result_class, status_class, Badge};
use crate::components::pagination::PaginationBar;
use crate::{error_text, parse_id, spawn_local};

#[server]
async fn get_project_detail(project_id: i64) -> Result<ProjectDetail, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .projects()
        .get(project_id)
        .await
        .map_err(|e| fail(e, "Could not load the project"))
}

#[server]
async fn get_project_terminals(project_id: i64, page: u32) -> Result<Page<Terminal>, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .projects()
        .terminals(project_id, page)
        .await
        .map_err(|e| fail(e, "Could not load terminals"))
}

#[server]
async fn get_project_histories(project_id: i64, page: u32) -> Result<Page<AuthHistory>, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .projects()
        .auth_histories(project_id, page)
        .await
        .map_err(|e| fail(e, "Could not load authentication history"))
}

fn kind_label(code: &str) -> String {
    PROJECT_KINDS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Project record, its terminals and its authentication history. The three
/// sections load and fail independently.
#[component]
pub fn ProjectDetailPage() -> impl IntoView {
    let params = use_params_map();
    let projectId = parse_id(params.with_untracked(|p| p.get("project_id")));

    view! {
        <div class="page-header">
            <h1>"Project details"</h1>
            <div class="page-actions">
                {projectId
                    .map(|id| {
                        view! {
                            <a href=format!("/projects/edit/{id}") class="btn btn-primary">
                                "Edit"
                            </a>
                        }
                    })}
                <a href="/projects" class="btn btn-ghost">"Back"</a>
            </div>
        </div>

        {match projectId {
            Some(id) => {
                view! {
                    <ProjectSection project_id=id />
                    <TerminalSection project_id=id />
                    <HistorySection project_id=id />
                }
                    .into_any()
            }
            None => view! { <p class="login-error">"Invalid project ID"</p> }.into_any(),
        }}
    }
}

#[component]
fn ProjectSection(project_id: i64) -> impl IntoView {
    let (detail, setDetail) = signal(Option::<Result<ProjectDetail, String>>::None);

    spawn_local(async move {
        let result = get_project_detail(project_id).await.map_err(error_text);
        setDetail.set(Some(result));
    });

    view! {
        <section class="card">
            <div class="card-title">"Project"</div>
            {move || match detail.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="login-error">{e}</p> }.into_any(),
                Some(Ok(p)) => {
                    view! {
                        <dl class="detail-list">
                            <dt>"Name"</dt>
                            <dd>{p.name.clone()}</dd>
                            <dt>"Customer code"</dt>
                            <dd>{p.customer_code.clone()}</dd>
                            <dt>"API key"</dt>
                            <dd class="mono">{p.api_key.clone()}</dd>
                            <dt>"Status"</dt>
                            <dd>
                                <Badge class=status_class(&p.status) text=p.status.clone() />
                            </dd>
                            <dt>"Type"</dt>
                            <dd>{kind_label(&p.kind)}</dd>
                            <dt>"Terminals"</dt>
                            <dd>{format!("{} / {}", p.activated_count, p.terminal_limit)}</dd>
                            <dt>"Period"</dt>
                            <dd>{format!("{} \u{2013} {}", p.open_at, p.close_at)}</dd>
                            <dt>"Terminal prefix"</dt>
                            <dd>{p.prefix.clone()}</dd>
                            <dt>"Description"</dt>
                            <dd>{p.description.clone()}</dd>
                        </dl>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn TerminalSection(project_id: i64) -> impl IntoView {
    let (page, setPage) = signal(1u32);
    let (listing, setListing) = signal(Option::<Result<Page<Terminal>, String>>::None);

    let load = move || {
        let page = page.get_untracked();
        spawn_local(async move {
            let result = get_project_terminals(project_id, page).await.map_err(error_text);
            setListing.set(Some(result));
        });
    };

    load();

    let onPageChange = Callback::new(move |target: u32| {
        setPage.set(target);
        load();
    });

    view! {
        <section class="card">
            <div class="card-title">"Terminals"</div>
            {move || match listing.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="login-error">{e}</p> }.into_any(),
                Some(Ok(Page { items, .. })) if items.is_empty() => {
                    view! { <p class="empty">"No terminals activated."</p> }.into_any()
                }
                Some(Ok(Page { items, pagination })) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Terminal ID"</th>
                                    <th>"Name"</th>
                                    <th>"Alias"</th>
                                    <th>"Serial no."</th>
                                    <th>"OS"</th>
                                    <th>"App"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {items
                                    .into_iter()
                                    .map(|t| {
                                        view! {
                                            <tr>
                                                <td class="mono">{t.terminal_id.clone()}</td>
                                                <td>{t.name.clone()}</td>
                                                <td>{t.alias.clone().unwrap_or_default()}</td>
                                                <td class="mono">{t.serial_no.clone()}</td>
                                                <td>{format!("{} {}", t.os, t.os_ver)}</td>
                                                <td>{t.app.as_ref().map(|a| a.name.clone()).unwrap_or_default()}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                        {pagination
                            .map(|pagination| {
                                view! { <PaginationBar pagination=pagination on_page_change=onPageChange /> }
                            })}
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn HistorySection(project_id: i64) -> impl IntoView {
    let (page, setPage) = signal(1u32);
    let (listing, setListing) = signal(Option::<Result<Page<AuthHistory>, String>>::None);

    let load = move || {
        let page = page.get_untracked();
        spawn_local(async move {
            let result = get_project_histories(project_id, page).await.map_err(error_text);
            setListing.set(Some(result));
        });
    };

    load();

    let onPageChange = Callback::new(move |target: u32| {
        setPage.set(target);
        load();
    });

    view! {
        <section class="card">
            <div class="card-title">"Authentication history"</div>
            {move || match listing.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="login-error">{e}</p> }.into_any(),
                Some(Ok(Page { items, .. })) if items.is_empty() => {
                    view! { <p class="empty">"No authentication history."</p> }.into_any()
                }
                Some(Ok(Page { items, pagination })) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Date"</th>
                                    <th>"Terminal"</th>
                                    <th>"Serial no."</th>
                                    <th>"App"</th>
                                    <th>"Action"</th>
                                    <th>"Result"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {items
                                    .into_iter()
                                    .map(|h| {
                                        view! {
                                            <tr>
                                                <td>{h.authenticate_at.clone()}</td>
                                                <td>{h.terminal_name.clone()}</td>
                                                <td class="mono">{h.serial_no.clone()}</td>
                                                <td>{h.app_label()}</td>
                                                <td>
                                                    <Badge class=action_class(&h.action) text=h.action.clone() />
                                                </td>
                                                <td>
                                                    <Badge class=result_class(&h.result) text=h.result.clone() />
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                        {pagination
                            .map(|pagination| {
                                view! { <PaginationBar pagination=pagination on_page_change=onPageChange /> }
                            })}
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_have_labels() {
        assert_eq!(kind_label("2"), "rent");
        assert_eq!(kind_label("9"), "9");
    }
}
