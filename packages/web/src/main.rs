use api::AppConfig;
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{AuthProvider, Route};

fn main() {
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

/// Settings baked in at build time (`FITNESS_API_URL=... dx build`).
fn build_time_var(key: &str) -> Option<String> {
    let value = match key {
        "FITNESS_API_URL" => option_env!("FITNESS_API_URL"),
        "FITNESS_AUTH_CLIENT_ID" => option_env!("FITNESS_AUTH_CLIENT_ID"),
        "FITNESS_AUTH_URL" => option_env!("FITNESS_AUTH_URL"),
        "FITNESS_TOKEN_URL" => option_env!("FITNESS_TOKEN_URL"),
        "FITNESS_REDIRECT_URI" => option_env!("FITNESS_REDIRECT_URI"),
        "FITNESS_REFRESH_STRATEGY" => option_env!("FITNESS_REFRESH_STRATEGY"),
        _ => None,
    };
    value.map(str::to_string)
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        AppConfig::default()
            .with_overrides(build_time_var)
            .unwrap_or_else(|e| {
                tracing::error!("Invalid build-time configuration, using defaults: {}", e);
                AppConfig::default()
            })
    });

    rsx! {
        AuthProvider {
            Router::<Route> {}
        }
    }
}
