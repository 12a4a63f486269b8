use beesight_types::{AuthHistory, Project};
use leptos::prelude::*;

use crate::components::badge::action_class;
use crate::{error_text, spawn_local};

const LATEST_LIMIT: u32 = 5;

#[server]
async fn get_latest_histories() -> Result<Vec<AuthHistory>, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .histories()
        .latest(LATEST_LIMIT)
        .await
        .map_err(|e| fail(e, "Could not load the latest authentications"))
}

#[server]
async fn search_projects(query: String) -> Result<Vec<Project>, ServerFnError> {
    use beesight_types::ListQuery;

    use crate::server::{backend, fail};

    let listQuery = ListQuery::default()
        .with_search(&query)
        .with_limit(LATEST_LIMIT);
    backend()
        .await?
        .projects()
        .list(&listQuery)
        .await
        .map(|page| page.items)
        .map_err(|e| fail(e, "Project search failed"))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (histories, setHistories) = signal(Option::<Result<Vec<AuthHistory>, String>>::None);
    let (searchTerm, setSearchTerm) = signal(String::new());
    let (results, setResults) = signal(Option::<Result<Vec<Project>, String>>::None);
    let (searching, setSearching) = signal(false);

    spawn_local(async move {
        let result = get_latest_histories().await.map_err(error_text);
        setHistories.set(Some(result));
    });

    let runSearch = move || {
        let term = searchTerm.get_untracked();
        if term.trim().is_empty() {
            setResults.set(None);
            return;
        }
        setSearching.set(true);
        spawn_local(async move {
            let result = search_projects(term).await.map_err(error_text);
            setResults.set(Some(result));
            setSearching.set(false);
        });
    };

    view! {
        <div class="dashboard-header">
            <h1>"Dashboard"</h1>
            <p class="subtitle">"Latest authentications and project shortcuts"</p>
        </div>

        <div class="dashboard-grid">
            <section class="card">
                <div class="card-title">"Latest authentications"</div>
                {move || match histories.get() {
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
                    Some(Ok(list)) if list.is_empty() => {
                        view! { <p class="empty">"No authentications yet."</p> }.into_any()
                    }
                    Some(Ok(list)) => {
                        view! {
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Date"</th>
                                        <th>"Action"</th>
                                        <th>"Project"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|item| {
                                            view! {
                                                <tr>
                                                    <td>{item.authenticate_at.clone()}</td>
                                                    <td>
                                                        <span class=action_class(&item.action)>
                                                            {item.action.clone()}
                                                        </span>
                                                    </td>
                                                    <td>
                                                        <a href=format!("/projects/{}", item.project_id)>
                                                            {item.project_name.clone()}
                                                        </a>
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
                <a href="/history" class="card-link">"Show all \u{2192}"</a>
            </section>

            <section class="card">
                <div class="card-title">"Project search"</div>
                <form
                    class="search-bar"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        runSearch();
                    }
                >
                    <input
                        type="text"
                        id="project-search"
                        placeholder="Project name"
                        prop:value=move || searchTerm.get()
                        on:input=move |ev| setSearchTerm.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary" disabled=move || searching.get()>
                        "Search"
                    </button>
                </form>
                {move || {
                    if searching.get() {
                        return view! { <p class="loading">"Searching..."</p> }.into_any();
                    }
                    match results.get() {
                        None => view! { <span></span> }.into_any(),
                        Some(Err(e)) => view! { <p class="login-error">{e}</p> }.into_any(),
                        Some(Ok(list)) if list.is_empty() => {
                            view! { <p class="empty">"No matching projects."</p> }.into_any()
                        }
                        Some(Ok(list)) => {
                            view! {
                                <ul class="search-results">
                                    {list
                                        .into_iter()
                                        .map(|p| {
                                            view! {
                                                <li>
                                                    <span>{p.name.clone()}</span>
                                                    <a class="btn btn-ghost btn-sm" href=format!("/projects/{}", p.project_id)>
                                                        "Details"
                                                    </a>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            }
                                .into_any()
                        }
                    }
                }}
            </section>

            <section class="card">
                <div class="card-title">"New project"</div>
                <p>"Register a project to issue an API key and terminal quota."</p>
                <a href="/projects/new" class="btn btn-primary">"+ Register project"</a>
            </section>
        </div>
    }
}
