use leptos::prelude::*;

/// Two-step delete: the first click arms the button, the second confirms.
#[component]
pub fn DeleteButton(
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    let (armed, setArmed) = signal(false);

    view! {
        {move || {
            if armed.get() {
                view! {
                    <span class="confirm-delete">
                        <button
                            class="btn btn-danger btn-sm"
                            disabled=move || busy.get()
                            on:click=move |_| {
                                setArmed.set(false);
                                on_confirm.run(());
                            }
                        >
                            "Really delete?"
                        </button>
                        <button class="btn btn-ghost btn-sm" on:click=move |_| setArmed.set(false)>
                            "Cancel"
                        </button>
                    </span>
                }
                    .into_any()
            } else {
                view! {
                    <button
                        class="btn btn-ghost btn-sm"
                        disabled=move || busy.get()
                        on:click=move |_| setArmed.set(true)
                    >
                        "Delete"
                    </button>
                }
                    .into_any()
            }
        }}
    }
}
