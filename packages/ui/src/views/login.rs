//! Login view shown for every route while signed out.

use api::AppConfig;
use dioxus::prelude::*;

use crate::auth::{complete_login, use_auth, use_identity, use_session_store, LoginButton};

#[component]
pub fn LoginView() -> Element {
    let auth = use_auth();

    rsx! {
        div {
            class: "login-container",
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem;",

            h1 {
                style: "margin-bottom: 0.5rem; font-weight: 700; font-size: 1.75rem;",
                "Fitness Tracker"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem;",
                "Sign in to record and review your activities."
            }

            LoginButton { label: "Login", class: "login-btn" }

            if let Some(error) = auth().error {
                p { class: "form-error", style: "margin-top: 1rem;", "{error}" }
            }

            if cfg!(not(target_arch = "wasm32")) {
                PasteRedirect {}
            }
        }
    }
}

/// Desktop has no page for the provider to redirect back to: the user pastes
/// the redirected URL here instead.
#[component]
fn PasteRedirect() -> Element {
    let config = use_context::<AppConfig>();
    let identity = use_identity();
    let session_store = use_session_store();
    let auth = use_auth();
    let mut redirect = use_signal(String::new);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = identity.clone();
        let session_store = session_store.clone();
        async move {
            let input = redirect().trim().to_string();
            if input.is_empty() {
                return;
            }
            if let Some(provider) = identity.0 {
                complete_login(provider, session_store, auth, input).await;
                redirect.set(String::new());
            }
        }
    };

    rsx! {
        form {
            class: "paste-redirect",
            style: "display: flex; flex-direction: column; gap: 0.5rem; margin-top: 2rem; width: 100%; max-width: 420px;",
            onsubmit,
            label {
                r#for: "redirect-url",
                style: "font-size: 0.875rem; color: #787774;",
                "After signing in, paste the address your browser was sent to:"
            }
            input {
                id: "redirect-url",
                placeholder: "{config.auth.redirect_uri}/?state=...&code=...",
                value: "{redirect}",
                oninput: move |evt| redirect.set(evt.value()),
            }
            button {
                r#type: "submit",
                class: "login-btn",
                disabled: auth().completing,
                "Complete sign-in"
            }
        }
    }
}
