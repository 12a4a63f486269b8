use beesight_types::{AuthHistory, Page};
use leptos::prelude::*;

use crate::components::badge::{action_class, result_class, Badge};
use crate::components::pagination::PaginationBar;
use crate::components::search_bar::SearchBar;
use crate::{error_text, spawn_local};

#[server]
async fn get_auth_histories(page: u32, search: String) -> Result<Page<AuthHistory>, ServerFnError> {
    use beesight_types::ListQuery;

    use crate::server::{backend, fail};

    let query = ListQuery::page(page).with_search(&search);
    backend()
        .await?
        .histories()
        .list(&query)
        .await
        .map_err(|e| fail(e, "Could not load authentication history"))
}

/// The query the listing was last loaded with. Typing alone never changes
/// it; only a submitted search or a page change does.
#[derive(Clone, Debug, PartialEq)]
struct HistoryQuery {
    page: u32,
    search: String,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
        }
    }
}

impl HistoryQuery {
    /// A new search starts from the first page.
    fn submitted(search: &str) -> Self {
        Self {
            page: 1,
            search: search.trim().to_string(),
        }
    }

    fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            search: self.search.clone(),
        }
    }
}

#[component]
pub fn AuthHistoryPage() -> impl IntoView {
    let (query, setQuery) = signal(HistoryQuery::default());
    let (listing, setListing) = signal(Option::<Result<Page<AuthHistory>, String>>::None);

    let load = move || {
        let HistoryQuery { page, search } = query.get_untracked();
        setListing.set(None);
        spawn_local(async move {
            let result = get_auth_histories(page, search).await.map_err(error_text);
            setListing.set(Some(result));
        });
    };

    load();

    let onSubmit = Callback::new(move |value: String| {
        setQuery.set(HistoryQuery::submitted(&value));
        load();
    });
    let onPageChange = Callback::new(move |target: u32| {
        setQuery.update(|q| *q = q.at_page(target));
        load();
    });

    view! {
        <div class="page-header">
            <h1>"Authentication history"</h1>
        </div>

        <SearchBar on_submit=onSubmit placeholder="Project, terminal or serial no." />

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
                let Page { items, pagination } = listing;
                view! {
                    {if items.is_empty() {
                        view! { <p class="empty">"No authentication history."</p> }.into_any()
                    } else {
                        view! { <HistoryTable items=items /> }.into_any()
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

#[component]
fn HistoryTable(items: Vec<AuthHistory>) -> impl IntoView {
    view! {
        <table class="table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Project"</th>
                    <th>"Terminal"</th>
                    <th>"Serial no."</th>
                    <th>"App"</th>
                    <th>"Action"</th>
                    <th>"Result"</th>
                    <th>"Message"</th>
                </tr>
            </thead>
            <tbody>
                {items
                    .into_iter()
                    .map(|item| {
                        let appLabel = item.app_label();
                        view! {
                            <tr>
                                <td>{item.authenticate_at.clone()}</td>
                                <td>
                                    <a href=format!("/projects/{}", item.project_id)>
                                        {item.project_name.clone()}
                                    </a>
                                </td>
                                <td>{item.terminal_name.clone()}</td>
                                <td class="mono">{item.serial_no.clone()}</td>
                                <td>{appLabel}</td>
                                <td>
                                    <Badge class=action_class(&item.action) text=item.action.clone() />
                                </td>
                                <td>
                                    <Badge class=result_class(&item.result) text=item.result.clone() />
                                </td>
                                <td>{item.auth_msg.clone()}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_keeps_the_submitted_search() {
        let query = HistoryQuery::submitted("  alpha ").at_page(3);
        assert_eq!(
            query,
            HistoryQuery {
                page: 3,
                search: "alpha".into()
            }
        );
    }

    #[test]
    fn new_search_returns_to_first_page() {
        let paged = HistoryQuery::default().at_page(4);
        assert_eq!(paged.page, 4);
        assert_eq!(paged.search, "");

        let searched = HistoryQuery::submitted("serial-9");
        assert_eq!(searched.page, 1);
        assert_eq!(searched.at_page(2).search, "serial-9");
    }

    #[test]
    fn page_zero_is_clamped() {
        assert_eq!(HistoryQuery::default().at_page(0).page, 1);
    }
}
