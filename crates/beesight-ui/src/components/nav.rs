use leptos::prelude::*;
use leptos_router::hooks::use_location;

const NAV_ITEMS: &[(&str, &str, &str)] = &[
    ("/", "\u{2302}", "Home"),
    ("/history", "\u{29D6}", "Auth history"),
    ("/projects", "\u{25A4}", "Projects"),
    ("/licenses", "\u{00A9}", "Licenses"),
    ("/apps", "\u{25A3}", "Apps"),
    ("/users", "\u{263A}", "Users"),
];

fn is_active(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path == href || path.starts_with(&format!("{href}/"))
    }
}

#[component]
pub fn Nav() -> impl IntoView {
    let location = use_location();

    view! {
        <nav class="nav-sidebar">
            <ul class="nav-links">
                {NAV_ITEMS
                    .iter()
                    .map(|(href, icon, label)| {
                        let href = *href;
                        view! {
                            <li class=move || {
                                if is_active(href, &location.pathname.get()) {
                                    "nav-item active"
                                } else {
                                    "nav-item"
                                }
                            }>
                                <a href=href>
                                    <span class="nav-icon">{*icon}</span>
                                    <span>{*label}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_item_follows_section() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/projects"));
        assert!(is_active("/projects", "/projects/edit/3"));
        assert!(!is_active("/apps", "/applications"));
    }
}
