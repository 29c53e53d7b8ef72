use api::AppConfig;
use dioxus::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ui::{AuthProvider, Route};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // <config_dir>/fitness-tracker/config.toml, then FITNESS_* from the environment
    let path = dirs::config_dir().map(|dir| dir.join("fitness-tracker").join(AppConfig::filename()));
    let config = AppConfig::load(path.as_deref()).unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });
    tracing::info!("Backend at {}", config.api.base_url);

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AuthProvider {
            Router::<Route> {}
        }
    }
}
