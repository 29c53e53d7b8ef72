//! Platform glue shared by every view.
//!
//! - **Web** (WASM + `web` feature): browser `localStorage`, window navigation,
//!   `gloo-timers`.
//! - **Desktop** (native): files under the platform data directory, the system
//!   browser via `open`, `tokio` timers.

use std::time::Duration;

/// Durable key/value storage for the current platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = store::FileStorage;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

/// Create the platform-appropriate storage backend.
///
/// - **Web**: `window.localStorage`
/// - **Desktop**: `<data_dir>/fitness-tracker/session/`
pub fn make_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("fitness-tracker")
            .join("session");
        store::FileStorage::new(base)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStorage::new()
    }
}

/// Send the user to `url`: the current window on the web, the system browser on desktop.
pub fn open_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to redirect: {:?}", e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = open::that(url) {
            tracing::error!("Failed to open browser: {}", e);
        }
    }
}

/// Full page reload. Returns `false` where the platform has no page to reload.
pub fn reload_page() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return window.location().reload().is_ok();
        }
        false
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// The address bar's query string if it carries an identity provider redirect.
pub fn redirect_in_address_bar() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let search = web_sys::window()?.location().search().ok()?;
        api::auth::is_callback(&search).then_some(search)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Drop the redirect's query string from the address bar without reloading.
pub fn clear_address_bar_query() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(path) = window.location().pathname() else {
            return;
        };
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
        }
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
