use beesight_types::{ActionReport, UserForm};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::field::{outcome_errors, ErrorSummary, Field, Outcome, SubmitNotice};
use crate::components::toast::use_toasts;
use crate::{error_text, spawn_local};

#[server]
async fn create_user(name: String, login_id: String, password: String) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    let form = UserForm {
        name,
        login_id,
        password,
    };
    if let Err(errors) = form.validate() {
        return Ok(ActionReport::invalid(errors));
    }
    let client = backend().await?;
    report(client.users().create(&form).await, "User registered", "Registration failed")
}

#[component]
pub fn UserRegisterPage() -> impl IntoView {
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (form, setForm) = signal(UserForm::default());
    let (outcome, setOutcome) = signal(Outcome::None);
    let (saving, setSaving) = signal(false);
    let errors = Signal::derive(move || outcome.with(outcome_errors));

    let submit = move || {
        let payload = form.get_untracked();
        if let Err(errors) = payload.validate() {
            setOutcome.set(Some(Ok(ActionReport::invalid(errors))));
            return;
        }
        let UserForm {
            name,
            login_id,
            password,
        } = payload;
        setSaving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = create_user(name, login_id, password).await.map_err(error_text);
            setSaving.set(false);
            if let Ok(report) = &result {
                if report.success {
                    if let Some(t) = toasts {
                        t.success(report.message.clone().unwrap_or_default());
                    }
                    navigate("/users", Default::default());
                }
            }
            setOutcome.set(Some(result));
        });
    };

    view! {
        <div class="page-header">
            <h1>"Register user"</h1>
            <a href="/users" class="btn btn-ghost">"Back"</a>
        </div>

        <SubmitNotice outcome=outcome />
        <ErrorSummary errors=errors />

        <form
            class="card form-card"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <Field label="Name" name="name" errors=errors>
                <input
                    type="text"
                    id="name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| setForm.update(|f| f.name = event_target_value(&ev))
                />
            </Field>
            <Field label="Login ID" name="login_id" errors=errors>
                <input
                    type="text"
                    id="login_id"
                    autocomplete="off"
                    prop:value=move || form.with(|f| f.login_id.clone())
                    on:input=move |ev| setForm.update(|f| f.login_id = event_target_value(&ev))
                />
            </Field>
            <Field label="Password" name="password" errors=errors>
                <input
                    type="password"
                    id="password"
                    autocomplete="new-password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| setForm.update(|f| f.password = event_target_value(&ev))
                />
            </Field>
            <div class="form-actions">
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Register" }}
                </button>
            </div>
        </form>
    }
}
