use beesight_types::{ActionReport, ValidationErrors, GENERAL_ERRORS};
use leptos::prelude::*;

/// Result of the last submit: a report from the backend or a transport error.
pub type Outcome = Option<Result<ActionReport, String>>;

/// Field errors carried by the last report, if any.
pub fn outcome_errors(outcome: &Outcome) -> ValidationErrors {
    match outcome {
        Some(Ok(report)) => report.errors.clone(),
        _ => ValidationErrors::new(),
    }
}

/// Labelled form row with the messages reported for `name` underneath.
#[component]
pub fn Field(
    label: &'static str,
    name: &'static str,
    #[prop(into)] errors: Signal<ValidationErrors>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            {children()}
            {move || {
                errors
                    .with(|e| e.get(name).map(|m| m.to_vec()))
                    .map(|messages| {
                        view! {
                            <ul class="field-errors">
                                {messages
                                    .into_iter()
                                    .map(|m| view! { <li>{m}</li> })
                                    .collect_view()}
                            </ul>
                        }
                    })
            }}
        </div>
    }
}

/// Every field error in one list, as the backend reported them.
#[component]
pub fn ErrorSummary(#[prop(into)] errors: Signal<ValidationErrors>) -> impl IntoView {
    move || {
        let entries: Vec<(String, String)> = errors.with(|e| {
            e.iter()
                .filter(|(_, messages)| !messages.is_empty())
                .map(|(field, messages)| (field.to_string(), messages.join(" / ")))
                .collect()
        });
        (!entries.is_empty()).then(|| {
            view! {
                <div class="error-summary">
                    <ul>
                        {entries
                            .into_iter()
                            .map(|(field, text)| {
                                view! {
                                    <li>
                                        {(field != GENERAL_ERRORS)
                                            .then(|| view! { <strong>{field} ":"</strong> " " })}
                                        {text}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
        })
    }
}

/// Outcome line above a form: the report's message, or a transport error.
#[component]
pub fn SubmitNotice(#[prop(into)] outcome: Signal<Outcome>) -> impl IntoView {
    move || match outcome.get() {
        None => None,
        Some(Ok(report)) if report.success => Some(
            view! { <div class="notice notice-success">{report.message.unwrap_or_default()}</div> }
                .into_any(),
        ),
        Some(Ok(report)) => Some(
            view! { <div class="notice notice-error">{report.message.unwrap_or_default()}</div> }
                .into_any(),
        ),
        Some(Err(e)) => Some(view! { <div class="notice notice-error">{e}</div> }.into_any()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reports_carry_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "required");
        let rejected: Outcome = Some(Ok(ActionReport::invalid(errors)));
        assert_eq!(outcome_errors(&rejected).first("name"), Some("required"));

        let failed: Outcome = Some(Err("backend is unreachable".into()));
        assert!(outcome_errors(&failed).is_empty());
        assert!(outcome_errors(&None).is_empty());
    }
}
