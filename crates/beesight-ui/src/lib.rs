#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server;

pub use app::{shell, App};

use leptos::prelude::ServerFnError;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}

/// Runs a server-function call from an event handler or on mount. Only the
/// hydrated client drives these; server renders drop the future unpolled.
pub fn spawn_local<F>(task: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    wasm_bindgen_futures::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}

/// The message to show for a failed server function, without the transport
/// prefix `ServerFnError`'s `Display` adds.
pub fn error_text(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message,
        other => other.to_string(),
    }
}

/// Route parameter to record ID.
pub fn parse_id(raw: Option<String>) -> Option<i64> {
    raw.and_then(|r| r.trim().parse().ok())
}
