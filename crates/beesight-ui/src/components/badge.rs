use leptos::prelude::*;

/// Badge colour for a project or app status.
pub fn status_class(status: &str) -> &'static str {
    match status {
        "active" => "badge badge-blue",
        "inactive" => "badge badge-red",
        _ => "badge badge-yellow",
    }
}

/// Badge colour for an authentication action.
pub fn action_class(action: &str) -> &'static str {
    match action {
        "activate" => "badge badge-blue",
        "deactivate" => "badge badge-red",
        _ => "badge badge-yellow",
    }
}

/// Badge colour for an authentication result.
pub fn result_class(result: &str) -> &'static str {
    match result {
        "success" => "badge badge-green",
        "failure" => "badge badge-red",
        _ => "badge badge-yellow",
    }
}

#[component]
pub fn Badge(class: &'static str, text: String) -> impl IntoView {
    view! { <span class=class>{text}</span> }
}
