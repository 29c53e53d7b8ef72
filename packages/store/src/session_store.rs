//! # Session store
//!
//! [`SessionStore`] is the single owner of the client's authentication state.
//! It is a cheap, cloneable handle meant to be injected (e.g. as a Dioxus
//! context) into everything that needs the current session.
//!
//! ## Operations
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`restore`](SessionStore::restore) | Builds the store from a [`Persistence`] backend, authenticated only if a complete session was persisted. |
//! | [`set_credentials`](SessionStore::set_credentials) | Validates token + claims, replaces the whole session, persists it. |
//! | [`set_credentials_with_lease`](SessionStore::set_credentials_with_lease) | Same, with the token's [`TokenLease`]. |
//! | [`logout`](SessionStore::logout) | Clears memory and persistence. Idempotent. |
//! | [`get`](SessionStore::get) / [`set`](SessionStore::set) / [`clear`](SessionStore::clear) | Raw context access. |
//! | [`subscribe`](SessionStore::subscribe) | A [`watch::Receiver`] that observes every replacement. |
//!
//! The current value lives inside a `watch::Sender`, so every write is a
//! whole-value replace and readers never observe a half-updated session.
//! Persistence failures are logged and do not roll back the in-memory change;
//! a failed save clears persistence so the next start is unauthenticated.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::lease::TokenLease;
use crate::persistence::Persistence;
use crate::session::{Claims, Session, SessionError};

/// Shared handle to the current session.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Option<Session>>>,
    persistence: Arc<dyn Persistence>,
}

impl SessionStore {
    /// Create a store from whatever `persistence` holds.
    ///
    /// Incomplete or malformed persisted data yields an unauthenticated store.
    /// Token freshness is not checked.
    pub fn restore(persistence: impl Persistence + 'static) -> Self {
        let restored = persistence.load();
        match &restored {
            Some(session) => tracing::info!("Restored session for {}", session.user_id()),
            None => tracing::debug!("No persisted session; starting unauthenticated"),
        }
        let (state, _) = watch::channel(restored);
        Self {
            state: Arc::new(state),
            persistence: Arc::new(persistence),
        }
    }

    /// Snapshot of the current session.
    pub fn get(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Replace the session and persist it.
    ///
    /// A failed write wipes what was persisted, so a partial write can never
    /// be restored as a mix of the old and new sessions.
    pub fn set(&self, session: Session) {
        if let Err(e) = self.persistence.save(&session) {
            tracing::warn!("Failed to persist session: {}", e);
            if let Err(e) = self.persistence.clear() {
                tracing::warn!("Failed to clear partially persisted session: {}", e);
            }
        }
        self.state.send_replace(Some(session));
    }

    /// Drop the session from memory and persistence.
    pub fn clear(&self) {
        if let Err(e) = self.persistence.clear() {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
        self.state.send_replace(None);
    }

    /// Store credentials returned by the identity provider.
    ///
    /// The subject identifier is read from `claims.sub`. On error the current
    /// session is left untouched.
    pub fn set_credentials(
        &self,
        token: impl Into<String>,
        claims: Claims,
    ) -> Result<Session, SessionError> {
        let session = Session::new(token, claims)?;
        tracing::info!("Signed in as {}", session.user_id());
        self.set(session.clone());
        Ok(session)
    }

    /// Like [`set_credentials`](Self::set_credentials), also recording when
    /// the token expires and how to renew it.
    pub fn set_credentials_with_lease(
        &self,
        token: impl Into<String>,
        claims: Claims,
        lease: TokenLease,
    ) -> Result<Session, SessionError> {
        let session = Session::new(token, claims)?.with_lease(lease);
        tracing::info!("Signed in as {}", session.user_id());
        self.set(session.clone());
        Ok(session)
    }

    /// Return to the unauthenticated state.
    pub fn logout(&self) {
        if self.is_authenticated() {
            tracing::info!("Signing out");
        }
        self.clear();
    }

    /// Observe session replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("user_id", &self.state.borrow().as_ref().map(|s| s.user_id().to_string()))
            .finish_non_exhaustive()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}
