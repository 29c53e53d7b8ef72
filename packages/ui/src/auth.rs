//! Authentication context and hooks for the UI.

use api::{ApiClient, AppConfig, AuthError, IdentityProvider};
use chrono::Utc;
use dioxus::prelude::*;
use store::{PendingLogin, Renewal, Session, SessionStore, TokenLease};

use crate::gate::AuthGate;
use crate::platform::{self, make_storage};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub session: Option<Session>,
    /// A provider redirect is being exchanged for tokens.
    pub completing: bool,
    /// Why the last login attempt failed.
    pub error: Option<String>,
}

impl AuthState {
    pub fn gate(&self) -> AuthGate {
        AuthGate::from_session(self.session.as_ref())
    }
}

/// Identity provider built from the configuration, if the configuration is usable.
#[derive(Clone, Debug)]
pub struct Identity(pub Option<IdentityProvider>);

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session_store() -> SessionStore {
    use_context::<SessionStore>()
}

/// The backend client. Every request carries the current session's credentials.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_identity() -> Identity {
    use_context::<Identity>()
}

/// Provider component that owns the session store and the backend client.
/// Expects an [`AppConfig`] in context. Wrap your app with this component.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let config = use_context::<AppConfig>();

    let session_store = use_context_provider(|| SessionStore::restore(make_storage()));
    use_context_provider(|| ApiClient::new(config.api.base_url.clone(), session_store.clone()));
    let identity = use_context_provider(|| {
        Identity(
            IdentityProvider::new(&config.auth)
                .map_err(|e| tracing::error!("Identity provider unavailable: {}", e))
                .ok(),
        )
    });

    let initial = session_store.get();
    let mut auth_state = use_context_provider(|| {
        Signal::new(AuthState {
            session: initial,
            ..AuthState::default()
        })
    });

    // Mirror session store changes into the signal and keep the token fresh
    let relogin = config.auth.relogin_on_expiry;
    let watched = session_store.clone();
    let renewer = identity.0.clone();
    use_future(move || {
        let store = watched.clone();
        let provider = renewer.clone();
        let mut rx = store.subscribe();
        async move {
            let mut renewal = schedule_renewal(provider.clone(), store.clone(), relogin);
            while rx.changed().await.is_ok() {
                let session = rx.borrow_and_update().clone();
                auth_state.write().session = session;
                if let Some(task) = renewal.take() {
                    task.cancel();
                }
                renewal = schedule_renewal(provider.clone(), store.clone(), relogin);
            }
        }
    });

    // Finish a login the provider redirected back to this page
    use_future(move || {
        let identity = identity.clone();
        let session_store = session_store.clone();
        async move {
            let Some(redirect) = platform::redirect_in_address_bar() else {
                return;
            };
            platform::clear_address_bar_query();
            if let Some(provider) = identity.0 {
                complete_login(provider, session_store, auth_state, redirect).await;
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Persist a fresh PKCE state and send the user to the provider's login page.
pub fn begin_login(provider: &IdentityProvider) {
    let request = provider.authorize();
    if let Err(e) = request.pending.save(&make_storage()) {
        tracing::error!("Failed to persist pending login: {}", e);
        return;
    }
    tracing::info!("Redirecting to identity provider");
    platform::open_url(&request.url);
}

/// Exchange the provider's redirect for tokens and install the session.
pub async fn complete_login(
    provider: IdentityProvider,
    session_store: SessionStore,
    mut auth_state: Signal<AuthState>,
    redirect: String,
) {
    auth_state.write().completing = true;
    let pending = PendingLogin::take(&make_storage());

    let result = match provider.complete_login(&redirect, pending).await {
        Ok(grant) => {
            let lease = grant.lease(Utc::now());
            session_store
                .set_credentials_with_lease(grant.access_token, grant.claims, lease)
                .map_err(AuthError::from)
        }
        Err(e) => Err(e),
    };

    let mut state = auth_state.write();
    state.completing = false;
    match result {
        Ok(_) => state.error = None,
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            state.error = Some(e.to_string());
        }
    }
}

/// Schedule whatever keeps the current session alive. The returned task is
/// cancelled whenever the session changes.
fn schedule_renewal(
    provider: Option<IdentityProvider>,
    store: SessionStore,
    relogin_on_expiry: bool,
) -> Option<Task> {
    let provider = provider?;
    let session = store.get()?;
    let lease = session.lease()?.clone();

    match lease.renewal(Utc::now()) {
        Renewal::Never => None,
        Renewal::Refresh { after } => Some(spawn(async move {
            platform::sleep(after).await;
            refresh_session(&provider, &store, &lease, relogin_on_expiry).await;
        })),
        Renewal::Relogin { after } if relogin_on_expiry => Some(spawn(async move {
            platform::sleep(after).await;
            tracing::info!("Session expired, starting a new login");
            begin_login(&provider);
        })),
        Renewal::Relogin { .. } => None,
    }
}

/// Trade the refresh token for a new access token, falling back to a new
/// login when the provider refuses.
async fn refresh_session(
    provider: &IdentityProvider,
    store: &SessionStore,
    lease: &TokenLease,
    relogin_on_expiry: bool,
) {
    let Some(refresh_token) = lease.refresh_token.as_deref() else {
        return;
    };
    match provider.refresh(refresh_token).await {
        Ok(grant) => {
            let renewed = grant.lease(Utc::now()).or_refresh_from(lease);
            match store.set_credentials_with_lease(grant.access_token, grant.claims, renewed) {
                Ok(_) => tracing::debug!("Access token refreshed"),
                Err(e) => tracing::warn!("Refreshed token rejected: {}", e),
            }
        }
        Err(e) => {
            tracing::warn!("Token refresh failed: {}", e);
            if relogin_on_expiry {
                begin_login(provider);
            }
        }
    }
}

/// Button that starts the login redirect.
#[component]
pub fn LoginButton(
    #[props(default = "Login".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let identity = use_identity();
    let auth = use_auth();

    let onclick = move |_| match &identity.0 {
        Some(provider) => begin_login(provider),
        None => tracing::error!("Login unavailable: identity provider is not configured"),
    };

    rsx! {
        button {
            class: "{class}",
            disabled: auth().completing,
            onclick: onclick,
            if auth().completing {
                "Signing in..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session_store = use_session_store();

    let onclick = move |_| session_store.logout();

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
