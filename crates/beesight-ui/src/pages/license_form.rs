use beesight_types::{ActionReport, KeyValue, License, LicenseForm, ValidationErrors};
use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::field::{outcome_errors, ErrorSummary, Field, Outcome, SubmitNotice};
use crate::components::toast::use_toasts;
use crate::{error_text, parse_id, spawn_local};

#[server]
async fn get_license(license_id: i64) -> Result<License, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .licenses()
        .get(license_id)
        .await
        .map_err(|e| fail(e, "Could not load the license"))
}

#[server(input = Json)]
async fn save_license(license_id: Option<i64>, form: LicenseForm) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    if let Err(errors) = form.validate() {
        return Ok(ActionReport::invalid(errors));
    }
    let client = backend().await?;
    match license_id {
        Some(id) => report(
            client.licenses().update(id, &form).await,
            "License updated",
            "Update failed",
        ),
        None => report(
            client.licenses().create(&form).await,
            "License registered",
            "Registration failed",
        ),
    }
}

/// Optional numeric input: blank or unparsable means unset.
fn parse_optional_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Optional date input: blank means no expiry.
fn parse_optional_date(raw: String) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[component]
pub fn LicenseRegisterPage() -> impl IntoView {
    view! {
        <div class="page-header">
            <h1>"Register license"</h1>
            <a href="/licenses" class="btn btn-ghost">"Back"</a>
        </div>
        <LicenseEditor license_id=None initial=LicenseForm::default() />
    }
}

#[component]
pub fn LicenseEditPage() -> impl IntoView {
    let params = use_params_map();
    let licenseId = parse_id(params.with_untracked(|p| p.get("license_id")));
    let (loaded, setLoaded) = signal(Option::<Result<License, String>>::None);

    match licenseId {
        Some(id) => spawn_local(async move {
            let result = get_license(id).await.map_err(error_text);
            setLoaded.set(Some(result));
        }),
        None => setLoaded.set(Some(Err("Invalid license ID".into()))),
    }

    view! {
        <div class="page-header">
            <h1>"Edit license"</h1>
            <a href="/licenses" class="btn btn-ghost">"Back"</a>
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
            Some(Ok(license)) => {
                view! {
                    <LicenseEditor
                        license_id=Some(license.license_id)
                        initial=LicenseForm::from(&license)
                    />
                }
                    .into_any()
            }
        }}
    }
}

/// Form body shared by register and edit. `initial` is also what the reset
/// button restores.
#[component]
fn LicenseEditor(license_id: Option<i64>, initial: LicenseForm) -> impl IntoView {
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (form, setForm) = signal(initial.clone());
    let (outcome, setOutcome) = signal(Outcome::None);
    let (saving, setSaving) = signal(false);
    let errors = Signal::derive(move || outcome.with(outcome_errors));

    let submit = move || {
        let payload = form.get_untracked();
        if let Err(errors) = payload.validate() {
            setOutcome.set(Some(Ok(ActionReport::invalid(errors))));
            return;
        }
        setSaving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = save_license(license_id, payload).await.map_err(error_text);
            setSaving.set(false);
            if let Ok(report) = &result {
                if report.success {
                    if let Some(t) = toasts {
                        t.success(report.message.clone().unwrap_or_default());
                    }
                    navigate("/licenses", Default::default());
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
            <Field label="License name" name="name" errors=errors>
                <input
                    type="text"
                    id="name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| setForm.update(|f| f.name = event_target_value(&ev))
                />
            </Field>
            <Field label="Supplier ID" name="supplier_id" errors=errors>
                <input
                    type="number"
                    id="supplier_id"
                    prop:value=move || {
                        form.with(|f| f.supplier_id.map(|id| id.to_string()).unwrap_or_default())
                    }
                    on:input=move |ev| {
                        let supplierId = parse_optional_id(&event_target_value(&ev));
                        setForm.update(|f| f.supplier_id = supplierId);
                    }
                />
            </Field>
            <div class="form-row">
                <Field label="Limit" name="limit" errors=errors>
                    <input
                        type="number"
                        id="limit"
                        min="0"
                        prop:value=move || form.with(|f| f.limit.to_string())
                        on:input=move |ev| {
                            let limit = event_target_value(&ev).trim().parse().unwrap_or(0);
                            setForm.update(|f| f.limit = limit);
                        }
                    />
                </Field>
                <Field label="Used" name="used" errors=errors>
                    <input
                        type="number"
                        id="used"
                        min="0"
                        prop:value=move || form.with(|f| f.used.to_string())
                        on:input=move |ev| {
                            let used = event_target_value(&ev).trim().parse().unwrap_or(0);
                            setForm.update(|f| f.used = used);
                        }
                    />
                </Field>
            </div>
            <Field label="Expires" name="expire_at" errors=errors>
                <input
                    type="date"
                    id="expire_at"
                    prop:value=move || form.with(|f| f.expire_at.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let expireAt = parse_optional_date(event_target_value(&ev));
                        setForm.update(|f| f.expire_at = expireAt);
                    }
                />
            </Field>
            <Field label="Description" name="description" errors=errors>
                <textarea
                    id="description"
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| setForm.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </Field>

            <KeyRows form=form set_form=setForm errors=errors />

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
                        match (saving.get(), license_id) {
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

/// Editable list of license key/value pairs.
#[component]
fn KeyRows(
    form: ReadSignal<LicenseForm>,
    set_form: WriteSignal<LicenseForm>,
    errors: Signal<ValidationErrors>,
) -> impl IntoView {
    // Rows re-render only when one is added or removed, not on every keystroke.
    let rowCount = Memo::new(move |_| form.with(|f| f.license_key.len()));

    view! {
        <div class="form-group">
            <label>"License keys"</label>
            {move || {
                (0..rowCount.get())
                    .map(|index| {
                        view! {
                            <div class="key-row">
                                <input
                                    type="text"
                                    placeholder="key"
                                    prop:value=move || {
                                        form.with(|f| {
                                            f.license_key.get(index).map(|kv| kv.key.clone()).unwrap_or_default()
                                        })
                                    }
                                    on:input=move |ev| {
                                        let key = event_target_value(&ev);
                                        set_form.update(|f| {
                                            if let Some(kv) = f.license_key.get_mut(index) {
                                                kv.key = key;
                                            }
                                        });
                                    }
                                />
                                <input
                                    type="text"
                                    placeholder="value"
                                    prop:value=move || {
                                        form.with(|f| {
                                            f.license_key.get(index).map(|kv| kv.value.clone()).unwrap_or_default()
                                        })
                                    }
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        set_form.update(|f| {
                                            if let Some(kv) = f.license_key.get_mut(index) {
                                                kv.value = value;
                                            }
                                        });
                                    }
                                />
                                <button
                                    type="button"
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| {
                                        set_form.update(|f| {
                                            if index < f.license_key.len() {
                                                f.license_key.remove(index);
                                            }
                                        });
                                    }
                                >
                                    "Remove"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <button
                type="button"
                class="btn btn-ghost btn-sm"
                on:click=move |_| set_form.update(|f| f.license_key.push(KeyValue::default()))
            >
                "+ Add key"
            </button>
            {move || {
                errors
                    .with(|e| e.first("license_key").map(str::to_string))
                    .map(|message| view! { <p class="field-errors">{message}</p> })
            }}
        </div>
    }
}
