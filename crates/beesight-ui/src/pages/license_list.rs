use beesight_types::{ActionReport, License};
use leptos::prelude::*;

use crate::components::delete_button::DeleteButton;
use crate::components::toast::use_toasts;
use crate::{error_text, spawn_local};

#[server]
pub async fn get_licenses() -> Result<Vec<License>, ServerFnError> {
    use crate::server::{backend, fail};

    backend()
        .await?
        .licenses()
        .list()
        .await
        .map_err(|e| fail(e, "Could not load licenses"))
}

#[server]
async fn delete_license(license_id: i64) -> Result<ActionReport, ServerFnError> {
    use crate::server::{backend, report};

    let client = backend().await?;
    report(
        client.licenses().delete(license_id).await,
        "License deleted",
        "Delete failed",
    )
}

fn expiry_label(license: &License) -> String {
    match license.expire_at.as_deref().map(beesight_types::date_part) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => "no expiry".into(),
    }
}

#[component]
pub fn LicenseListPage() -> impl IntoView {
    let toasts = use_toasts();
    let (licenses, setLicenses) = signal(Option::<Result<Vec<License>, String>>::None);
    let (deleting, setDeleting) = signal(false);

    spawn_local(async move {
        let result = get_licenses().await.map_err(error_text);
        setLicenses.set(Some(result));
    });

    let onDelete = move |licenseId: i64| {
        setDeleting.set(true);
        spawn_local(async move {
            match delete_license(licenseId).await {
                Ok(report) if report.success => {
                    setLicenses.update(|list| {
                        if let Some(Ok(list)) = list {
                            list.retain(|l| l.license_id != licenseId);
                        }
                    });
                    if let Some(t) = toasts {
                        t.success(report.message.unwrap_or_else(|| "License deleted".into()));
                    }
                }
                Ok(report) => {
                    if let Some(t) = toasts {
                        t.error(report.message.unwrap_or_else(|| "Delete failed".into()));
                    }
                }
                Err(e) => {
                    if let Some(t) = toasts {
                        t.error(error_text(e));
                    }
                }
            }
            setDeleting.set(false);
        });
    };

    view! {
        <div class="page-header">
            <h1>"Licenses"</h1>
            <a href="/licenses/new" class="btn btn-primary">"+ Register"</a>
        </div>

        {move || match licenses.get() {
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
            Some(Ok(list)) if list.is_empty() => {
                view! { <p class="empty">"No licenses."</p> }.into_any()
            }
            Some(Ok(list)) => {
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Name"</th>
                                <th>"Supplier"</th>
                                <th>"Used / limit"</th>
                                <th>"Expires"</th>
                                <th>"Keys"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list
                                .into_iter()
                                .map(|license| {
                                    let licenseId = license.license_id;
                                    let keys = license
                                        .key_pairs()
                                        .into_iter()
                                        .map(|kv| format!("{}={}", kv.key, kv.value))
                                        .collect::<Vec<_>>()
                                        .join(", ");
                                    view! {
                                        <tr>
                                            <td>{licenseId}</td>
                                            <td>{license.name.clone()}</td>
                                            <td>{license.supplier_label()}</td>
                                            <td>{format!("{} / {}", license.used, license.limit)}</td>
                                            <td>{expiry_label(&license)}</td>
                                            <td class="mono">{keys}</td>
                                            <td class="row-actions">
                                                <a
                                                    class="btn btn-ghost btn-sm"
                                                    href=format!("/licenses/edit/{licenseId}")
                                                >
                                                    "Edit"
                                                </a>
                                                <DeleteButton
                                                    on_confirm=Callback::new(move |_| onDelete(licenseId))
                                                    busy=deleting
                                                />
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_any()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_expiry_reads_no_expiry() {
        let mut license = License::default();
        assert_eq!(expiry_label(&license), "no expiry");
        license.expire_at = Some("2026-03-31 23:59:59".into());
        assert_eq!(expiry_label(&license), "2026-03-31");
    }
}
