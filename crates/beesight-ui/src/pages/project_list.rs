use beesight_types::{filter_projects, ActionReport, Page, Project};
use leptos::prelude::*;

use crate::components::badge::{status_class, Badge};
use crate::components::delete_button::DeleteButton;
use crate::components::pagination::PaginationBar;
use crate::components::search_bar::SearchBar;
use crate::components::toast::use_toasts;
use crate::{error_text, spawn_local};

#[server]
async fn get_projects(page: u32) -> Result<Page<Project>, ServerFnError> {
    use beesight_types::ListQuery;

    use crate::server::{backend, fail};

    backend()
        .await?
        .projects()
        .list(&ListQuery::page(page))
        .await
        .map_err(|e| fail(e, "Could not load projects"))
}

#[server]
async fn delete_project(project_id: i64) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    let client = backend().await?;
    report(
        client.projects().delete(project_id).await,
        "Project deleted",
        "Delete failed",
    )
}

/// Drops a deleted project from the loaded page without refetching.
fn remove_project(listing: &mut Option<Result<Page<Project>, String>>, project_id: i64) {
    if let Some(Ok(page)) = listing {
        page.items.retain(|p| p.project_id != project_id);
    }
}

#[component]
pub fn ProjectListPage() -> impl IntoView {
    let toasts = use_toasts();
    let (page, setPage) = signal(1u32);
    let (filter, setFilter) = signal(String::new());
    let (listing, setListing) = signal(Option::<Result<Page<Project>, String>>::None);
    let (deleting, setDeleting) = signal(false);

    let load = move || {
        let page = page.get_untracked();
        setListing.set(None);
        spawn_local(async move {
            let result = get_projects(page).await.map_err(error_text);
            setListing.set(Some(result));
        });
    };

    load();

    let onPageChange = Callback::new(move |target: u32| {
        setPage.set(target);
        load();
    });

    let onDelete = move |projectId: i64| {
        setDeleting.set(true);
        spawn_local(async move {
            match delete_project(projectId).await {
                Ok(report) if report.success => {
                    setListing.update(|listing| remove_project(listing, projectId));
                    if let Some(t) = toasts {
                        t.success(report.message.unwrap_or_else(|| "Project deleted".into()));
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
            <h1>"Projects"</h1>
            <a href="/projects/new" class="btn btn-primary">"+ Register"</a>
        </div>

        <SearchBar
            on_search=Callback::new(move |value: String| setFilter.set(value))
            placeholder="Filter by project name"
        />

        {move || match listing.get() {
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
            Some(Ok(listing)) => {
                let rows = filter_projects(&listing.items, &filter.get());
                let pagination = listing.pagination;
                view! {
                    {if rows.is_empty() {
                        view! { <p class="empty">"No projects."</p> }.into_any()
                    } else {
                        view! {
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"API key"</th>
                                        <th>"Status"</th>
                                        <th>"Terminals"</th>
                                        <th>"Period"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows
                                        .into_iter()
                                        .map(|project| {
                                            let projectId = project.project_id;
                                            view! {
                                                <tr>
                                                    <td>
                                                        <a href=format!("/projects/{projectId}")>
                                                            {project.name.clone()}
                                                        </a>
                                                    </td>
                                                    <td class="mono">{project.api_key.clone()}</td>
                                                    <td>
                                                        <Badge
                                                            class=status_class(&project.status)
                                                            text=project.status.clone()
                                                        />
                                                    </td>
                                                    <td>
                                                        {format!(
                                                            "{} / {}",
                                                            project.activated_count,
                                                            project.terminal_limit,
                                                        )}
                                                    </td>
                                                    <td>
                                                        {format!("{} \u{2013} {}", project.open_at, project.close_at)}
                                                    </td>
                                                    <td class="row-actions">
                                                        <a
                                                            class="btn btn-ghost btn-sm"
                                                            href=format!("/projects/edit/{projectId}")
                                                        >
                                                            "Edit"
                                                        </a>
                                                        <DeleteButton
                                                            on_confirm=Callback::new(move |_| onDelete(projectId))
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
                    }}
                    {pagination
                        .map(|pagination| {
                            view! { <PaginationBar pagination=pagination on_page_change=onPageChange /> }
                        })}
                }
                    .into_any()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_row_leaves_the_listing() {
        let mut listing = Some(Ok(Page {
            items: vec![
                Project { project_id: 1, ..Default::default() },
                Project { project_id: 2, ..Default::default() },
            ],
            pagination: None,
        }));
        remove_project(&mut listing, 1);
        let ids: Vec<i64> = listing.unwrap().unwrap().items.iter().map(|p| p.project_id).collect();
        assert_eq!(ids, vec![2]);

        let mut failed: Option<Result<Page<Project>, String>> = Some(Err("offline".into()));
        remove_project(&mut failed, 1);
        assert!(matches!(failed, Some(Err(_))));
    }
}
