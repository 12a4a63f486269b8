#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use beesight_api::session::SessionConfig;
    use beesight_client::ClientConfig;
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub backend: ClientConfig,
        pub session: SessionConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    impl ServerConfig {
        pub fn addr(&self) -> String {
            format!("{}:{}", self.bind, self.port)
        }
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("failed to parse config {path}: {e}, using defaults");
                Config::default()
            }),
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use beesight_api::middleware::auth::AppState;
    use beesight_client::ApiClient;
    use beesight_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={} backend={}",
        appConfig.server.addr(),
        appConfig.backend.base_url
    );
    if !appConfig.session.secure {
        tracing::warn!("session cookie is not marked Secure; use only over plain-http development setups");
    }

    let backend = ApiClient::new(&appConfig.backend)
        .unwrap_or_else(|e| panic!("invalid [backend] config: {e}"));

    let appState = AppState {
        backend,
        session: appConfig.session.clone(),
        config_path: configPath,
    };

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = appConfig.server.addr();

    let routes = generate_route_list(App);

    // The API sub-router carries its own AppState; Leptos routes get it as context.
    let apiRouter = beesight_api::api_router(appState.clone());

    let pageAuthLayer = axum::middleware::from_fn_with_state(
        appState.clone(),
        beesight_api::middleware::auth::require_page_auth,
    );

    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let appState = appState.clone();
                move || provide_context(appState.clone())
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(apiRouter)
        .layer(pageAuthLayer)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
