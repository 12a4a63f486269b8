use leptos::prelude::*;

/// Text box for filtering. `on_search` fires on every keystroke. With
/// `on_submit`, the bar also shows a search button and fires it on the
/// button or Enter.
#[component]
pub fn SearchBar(
    #[prop(into, optional)] on_search: Option<Callback<String>>,
    #[prop(into, optional)] on_submit: Option<Callback<String>>,
    #[prop(default = "Search")] placeholder: &'static str,
) -> impl IntoView {
    let (query, setQuery) = signal(String::new());

    let submit = move || {
        if let Some(onSubmit) = on_submit {
            onSubmit.run(query.get_untracked());
        }
    };

    view! {
        <form
            class="search-bar"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <label for="search" class="sr-only">"Search"</label>
            <input
                type="text"
                id="search"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    setQuery.set(value.clone());
                    if let Some(onSearch) = on_search {
                        onSearch.run(value);
                    }
                }
            />
            {on_submit
                .is_some()
                .then(|| view! { <button type="submit" class="btn btn-primary">"Search"</button> })}
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_only_with_a_submit_handler() {
        Owner::new().with(|| {
            let filterOnly = view! { <SearchBar on_search=Callback::new(|_: String| {}) /> }.to_html();
            assert!(filterOnly.contains("<input"));
            assert!(!filterOnly.contains("<button"));

            let submitting = view! { <SearchBar on_submit=Callback::new(|_: String| {}) /> }.to_html();
            assert!(submitting.contains("<button"));
        });
    }
}
