use beesight_types::Pagination;
use leptos::prelude::*;

/// Stateless renderer for the backend's page descriptor. Prev/next disable
/// at the boundaries; numeric links jump straight to their page.
#[component]
pub fn PaginationBar(pagination: Pagination, #[prop(into)] on_page_change: Callback<u32>) -> impl IntoView {
    let (total, from, to) = pagination.summary();
    let prevPage = pagination.prev_page();
    let nextPage = pagination.next_page();
    let buttons = pagination.buttons();

    view! {
        <div class="pagination">
            <span class="pagination-summary">
                {format!("{from}\u{2013}{to} of {total}")}
            </span>
            <div class="pagination-buttons">
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=prevPage.is_none()
                    on:click=move |_| {
                        if let Some(page) = prevPage {
                            on_page_change.run(page);
                        }
                    }
                >
                    "\u{2039}"
                </button>
                {buttons
                    .into_iter()
                    .map(|button| {
                        let page = button.page;
                        view! {
                            <button
                                class=if button.active { "btn btn-sm page-active" } else { "btn btn-ghost btn-sm" }
                                disabled=page.is_none()
                                on:click=move |_| {
                                    if let Some(page) = page {
                                        on_page_change.run(page);
                                    }
                                }
                            >
                                {decode_label(&button.label)}
                            </button>
                        }
                    })
                    .collect_view()}
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=nextPage.is_none()
                    on:click=move |_| {
                        if let Some(page) = nextPage {
                            on_page_change.run(page);
                        }
                    }
                >
                    "\u{203a}"
                </button>
            </div>
        </div>
    }
}

/// Labels arrive HTML-escaped; text nodes would show the entities verbatim.
fn decode_label(label: &str) -> String {
    label
        .replace("&laquo;", "\u{ab}")
        .replace("&raquo;", "\u{bb}")
        .replace("&hellip;", "\u{2026}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_label("&hellip;"), "\u{2026}");
        assert_eq!(decode_label("3"), "3");
    }
}
