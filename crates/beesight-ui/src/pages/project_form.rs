use beesight_types::{ActionReport, ProjectDetail, ProjectForm, ValidationErrors, PROJECT_KINDS, PROJECT_STATUSES};
use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::field::{outcome_errors, ErrorSummary, Field, Outcome, SubmitNotice};
use crate::components::toast::use_toasts;
use crate::{error_text, parse_id, spawn_local};

#[server]
async fn get_project(project_id: i64) -> Result<ProjectDetail, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .projects()
        .get(project_id)
        .await
        .map_err(|e| fail(e, "Could not load the project"))
}

#[server(input = Json)]
async fn create_project(form: ProjectForm) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    if let Err(errors) = form.validate() {
        return Ok(ActionReport::invalid(errors));
    }
    let client = backend().await?;
    report(
        client.projects().create(&form).await,
        "Project registered",
        "Registration failed",
    )
}

#[server(input = Json)]
async fn update_project(project_id: i64, form: ProjectForm) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    if let Err(errors) = form.validate() {
        return Ok(ActionReport::invalid(errors));
    }
    let client = backend().await?;
    report(
        client.projects().update(project_id, &form).await,
        "Project updated",
        "Update failed",
    )
}

#[component]
pub fn ProjectRegisterPage() -> impl IntoView {
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (form, setForm) = signal(ProjectForm::default());
    let (outcome, setOutcome) = signal(Outcome::None);
    let (saving, setSaving) = signal(false);

    let submit = move || {
        let payload = form.get_untracked();
        if let Err(errors) = payload.validate() {
            setOutcome.set(Some(Ok(ActionReport::invalid(errors))));
            return;
        }
        setSaving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = create_project(payload).await.map_err(error_text);
            setSaving.set(false);
            if let Ok(report) = &result {
                if report.success {
                    if let Some(t) = toasts {
                        t.success(report.message.clone().unwrap_or_default());
                    }
                    navigate("/projects", Default::default());
                }
            }
            setOutcome.set(Some(result));
        });
    };

    view! {
        <div class="page-header">
            <h1>"Register project"</h1>
            <a href="/projects" class="btn btn-ghost">"Back"</a>
        </div>

        <SubmitNotice outcome=outcome />
        <ErrorSummary errors=Signal::derive(move || outcome.with(outcome_errors)) />

        <form
            class="card form-card"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <ProjectFields
                form=form
                set_form=setForm
                errors=Signal::derive(move || outcome.with(outcome_errors))
            />
            <div class="form-actions">
                <button
                    type="button"
                    class="btn btn-ghost"
                    on:click=move |_| {
                        setForm.set(ProjectForm::default());
                        setOutcome.set(None);
                    }
                >
                    "Reset"
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Register" }}
                </button>
            </div>
        </form>
    }
}

#[component]
pub fn ProjectEditPage() -> impl IntoView {
    let toasts = use_toasts();
    let navigate = use_navigate();
    let params = use_params_map();
    let projectId = parse_id(params.with_untracked(|p| p.get("project_id")));

    let (loaded, setLoaded) = signal(Option::<Result<ProjectDetail, String>>::None);
    let (form, setForm) = signal(ProjectForm::default());
    let (outcome, setOutcome) = signal(Outcome::None);
    let (saving, setSaving) = signal(false);

    match projectId {
        Some(id) => spawn_local(async move {
            let result = get_project(id).await.map_err(error_text);
            if let Ok(detail) = &result {
                setForm.set(ProjectForm::from(detail));
            }
            setLoaded.set(Some(result));
        }),
        None => setLoaded.set(Some(Err("Invalid project ID".into()))),
    }

    let submit = move || {
        let Some(id) = projectId else { return };
        let payload = form.get_untracked();
        if let Err(errors) = payload.validate() {
            setOutcome.set(Some(Ok(ActionReport::invalid(errors))));
            return;
        }
        setSaving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = update_project(id, payload).await.map_err(error_text);
            setSaving.set(false);
            if let Ok(report) = &result {
                if report.success {
                    if let Some(t) = toasts {
                        t.success(report.message.clone().unwrap_or_default());
                    }
                    navigate(&format!("/projects/{id}"), Default::default());
                }
            }
            setOutcome.set(Some(result));
        });
    };

    let reset = move || {
        if let Some(Ok(detail)) = loaded.get_untracked() {
            setForm.set(ProjectForm::from(&detail));
        }
        setOutcome.set(None);
    };

    view! {
        <div class="page-header">
            <h1>"Edit project"</h1>
            <a href="/projects" class="btn btn-ghost">"Back"</a>
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
            Some(Ok(_)) => {
                let submit = submit.clone();
                view! {
                    <SubmitNotice outcome=outcome />
                    <ErrorSummary errors=Signal::derive(move || outcome.with(outcome_errors)) />
                    <form
                        class="card form-card"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <ProjectFields
                            form=form
                            set_form=setForm
                            errors=Signal::derive(move || outcome.with(outcome_errors))
                        />
                        <div class="form-actions">
                            <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                                "Reset"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                {move || if saving.get() { "Saving..." } else { "Update" }}
                            </button>
                        </div>
                    </form>
                }
                    .into_any()
            }
        }}
    }
}

/// Inputs shared by the register and edit screens.
#[component]
fn ProjectFields(
    form: ReadSignal<ProjectForm>,
    set_form: WriteSignal<ProjectForm>,
    errors: Signal<ValidationErrors>,
) -> impl IntoView {
    view! {
        <Field label="Project name" name="name" errors=errors>
            <input
                type="text"
                id="name"
                prop:value=move || form.with(|f| f.name.clone())
                on:input=move |ev| set_form.update(|f| f.name = event_target_value(&ev))
            />
        </Field>
        <Field label="Customer code" name="customer_code" errors=errors>
            <input
                type="text"
                id="customer_code"
                prop:value=move || form.with(|f| f.customer_code.clone())
                on:input=move |ev| set_form.update(|f| f.customer_code = event_target_value(&ev))
            />
        </Field>
        <Field label="API key" name="api_key" errors=errors>
            <input
                type="text"
                id="api_key"
                class="mono"
                prop:value=move || form.with(|f| f.api_key.clone())
                on:input=move |ev| set_form.update(|f| f.api_key = event_target_value(&ev))
            />
        </Field>
        <Field label="Authentication password" name="password" errors=errors>
            <input
                type="text"
                id="password"
                prop:value=move || form.with(|f| f.password.clone())
                on:input=move |ev| set_form.update(|f| f.password = event_target_value(&ev))
            />
        </Field>
        <Field label="Terminal limit" name="terminal_limit" errors=errors>
            <input
                type="number"
                id="terminal_limit"
                min="1"
                prop:value=move || form.with(|f| f.terminal_limit.to_string())
                on:input=move |ev| {
                    let limit = event_target_value(&ev).trim().parse().unwrap_or(0);
                    set_form.update(|f| f.terminal_limit = limit);
                }
            />
        </Field>
        <div class="form-row">
            <Field label="Start date" name="open_at" errors=errors>
                <input
                    type="date"
                    id="open_at"
                    prop:value=move || form.with(|f| f.open_at.clone())
                    on:input=move |ev| set_form.update(|f| f.open_at = event_target_value(&ev))
                />
            </Field>
            <Field label="End date" name="close_at" errors=errors>
                <input
                    type="date"
                    id="close_at"
                    prop:value=move || form.with(|f| f.close_at.clone())
                    on:input=move |ev| set_form.update(|f| f.close_at = event_target_value(&ev))
                />
            </Field>
        </div>
        <div class="form-row">
            <Field label="Status" name="status" errors=errors>
                <select
                    id="status"
                    prop:value=move || form.with(|f| f.status.clone())
                    on:change=move |ev| set_form.update(|f| f.status = event_target_value(&ev))
                >
                    {PROJECT_STATUSES
                        .iter()
                        .map(|status| view! { <option value=*status>{*status}</option> })
                        .collect_view()}
                </select>
            </Field>
            <Field label="Type" name="type" errors=errors>
                <select
                    id="type"
                    prop:value=move || form.with(|f| f.kind.clone())
                    on:change=move |ev| set_form.update(|f| f.kind = event_target_value(&ev))
                >
                    {PROJECT_KINDS
                        .iter()
                        .map(|(code, label)| view! { <option value=*code>{*label}</option> })
                        .collect_view()}
                </select>
            </Field>
        </div>
        <Field label="Terminal prefix" name="prefix" errors=errors>
            <input
                type="text"
                id="prefix"
                prop:value=move || form.with(|f| f.prefix.clone())
                on:input=move |ev| set_form.update(|f| f.prefix = event_target_value(&ev))
            />
        </Field>
        <Field label="Description" name="description" errors=errors>
            <textarea
                id="description"
                rows="3"
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| set_form.update(|f| f.description = event_target_value(&ev))
            ></textarea>
        </Field>
    }
}
