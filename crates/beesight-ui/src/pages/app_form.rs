use beesight_types::{ActionReport, App, AppForm, License, APP_STATUSES};
use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::field::{outcome_errors, ErrorSummary, Field, Outcome, SubmitNotice};
use crate::components::toast::use_toasts;
use crate::pages::license_list::get_licenses;
use crate::{error_text, parse_id, spawn_local};

#[server]
async fn get_app(app_id: i64) -> Result<App, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .apps()
        .get(app_id)
        .await
        .map_err(|e| fail(e, "Could not load the app"))
}

#[server(input = Json)]
async fn save_app(app_id: Option<i64>, form: AppForm) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    if let Err(errors) = form.validate() {
        return Ok(ActionReport::invalid(errors));
    }
    let client = backend().await?;
    match app_id {
        Some(id) => report(client.apps().update(id, &form).await, "App updated", "Update failed"),
        None => report(client.apps().create(&form).await, "App registered", "Registration failed"),
    }
}

#[component]
pub fn AppRegisterPage() -> impl IntoView {
    view! {
        <div class="page-header">
            <h1>"Register app"</h1>
            <a href="/apps" class="btn btn-ghost">"Back"</a>
        </div>
        <AppEditor app_id=None initial=AppForm::default() />
    }
}

#[component]
pub fn AppEditPage() -> impl IntoView {
    let params = use_params_map();
    let appId = parse_id(params.with_untracked(|p| p.get("app_id")));
    let (loaded, setLoaded) = signal(Option::<Result<App, String>>::None);

    match appId {
        Some(id) => spawn_local(async move {
            let result = get_app(id).await.map_err(error_text);
            setLoaded.set(Some(result));
        }),
        None => setLoaded.set(Some(Err("Invalid app ID".into()))),
    }

    view! {
        <div class="page-header">
            <h1>"Edit app"</h1>
            <a href="/apps" class="btn btn-ghost">"Back"</a>
        </div>

        {move || match loaded.get() {
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
            Some(Ok(app)) => {
                view! { <AppEditor app_id=Some(app.app_id) initial=AppForm::from(&app) /> }.into_any()
            }
        }}
    }
}

#[component]
fn AppEditor(app_id: Option<i64>, initial: AppForm) -> impl IntoView {
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (form, setForm) = signal(initial.clone());
    let (licenses, setLicenses) = signal(Option::<Result<Vec<License>, String>>::None);
    let (outcome, setOutcome) = signal(Outcome::None);
    let (saving, setSaving) = signal(false);
    let errors = Signal::derive(move || outcome.with(outcome_errors));

    spawn_local(async move {
        let result = get_licenses().await.map_err(error_text);
        setLicenses.set(Some(result));
    });

    let submit = move || {
        let payload = form.get_untracked();
        if let Err(errors) = payload.validate() {
            setOutcome.set(Some(Ok(ActionReport::invalid(errors))));
            return;
        }
        setSaving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = save_app(app_id, payload).await.map_err(error_text);
            setSaving.set(false);
            if let Ok(report) = &result {
                if report.success {
                    if let Some(t) = toasts {
                        t.success(report.message.clone().unwrap_or_default());
                    }
                    navigate("/apps", Default::default());
                }
            }
            setOutcome.set(Some(result));
        });
    };

    view! {
        <SubmitNotice outcome=outcome />
        <ErrorSummary errors=errors />

        <form
            class="card form-card"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <Field label="App name" name="name" errors=errors>
                <input
                    type="text"
                    id="name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| setForm.update(|f| f.name = event_target_value(&ev))
                />
            </Field>
            <div class="form-row">
                <Field label="Version" name="version" errors=errors>
                    <input
                        type="text"
                        id="version"
                        prop:value=move || form.with(|f| f.version.clone())
                        on:input=move |ev| setForm.update(|f| f.version = event_target_value(&ev))
                    />
                </Field>
                <Field label="Status" name="status" errors=errors>
                    <select
                        id="status"
                        prop:value=move || form.with(|f| f.status.clone())
                        on:change=move |ev| setForm.update(|f| f.status = event_target_value(&ev))
                    >
                        {APP_STATUSES
                            .iter()
                            .map(|status| view! { <option value=*status>{*status}</option> })
                            .collect_view()}
                    </select>
                </Field>
            </div>
            <Field label="Description" name="description" errors=errors>
                <textarea
                    id="description"
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| setForm.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </Field>
            <Field label="Licenses" name="license_ids" errors=errors>
                {move || match licenses.get() {
                    None => view! { <p class="loading">"Loading licenses..."</p> }.into_any(),
                    Some(Err(e)) => view! { <p class="login-error">{e}</p> }.into_any(),
                    Some(Ok(list)) if list.is_empty() => {
                        view! { <p class="empty">"No licenses registered."</p> }.into_any()
                    }
                    Some(Ok(list)) => {
                        view! {
                            <div class="checkbox-list">
                                {list
                                    .into_iter()
                                    .map(|license| {
                                        let licenseId = license.license_id;
                                        view! {
                                            <label class="checkbox">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || {
                                                        form.with(|f| f.license_ids.contains(&licenseId))
                                                    }
                                                    on:change=move |ev| {
                                                        let checked = event_target_checked(&ev);
                                                        setForm.update(|f| f.toggle_license(licenseId, checked));
                                                    }
                                                />
                                                {format!("{} ({licenseId})", license.name)}
                                            </label>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }}
            </Field>

            <div class="form-actions">
                <button
                    type="button"
                    class="btn btn-ghost"
                    on:click=move |_| {
                        setForm.set(initial.clone());
                        setOutcome.set(None);
                    }
                >
                    "Reset"
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || {
                        match (saving.get(), app_id) {
                            (true, _) => "Saving...",
                            (false, Some(_)) => "Update",
                            (false, None) => "Register",
                        }
                    }}
                </button>
            </div>
        </form>
    }
}
