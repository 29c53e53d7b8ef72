//! # Durable session persistence
//!
//! Two layers:
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`KeyValueStore`] | String key/value storage provided by the platform (browser `localStorage`, files, memory). |
//! | [`Persistence`] | Session-level `load` / `save` / `clear`. Blanket-implemented for every [`KeyValueStore`] using the three well-known keys below. |
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `token` | bearer token |
//! | `user` | identity claims serialised as a JSON object |
//! | `userId` | subject identifier |
//!
//! The session's [`TokenLease`] is stored alongside under its own keys.
//!
//! `load` is fail-closed: a missing, empty or unparseable entry, or a `userId`
//! that differs from the claims' `sub`, yields `None` instead of an error.

use thiserror::Error;

use crate::lease::TokenLease;
use crate::session::{Claims, Session};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const USER_ID_KEY: &str = "userId";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialise claims: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Platform key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Session persistence.
pub trait Persistence: Send + Sync {
    /// Read a previously saved session, or `None` when nothing complete is stored.
    fn load(&self) -> Option<Session>;
    /// Persist the whole session.
    fn save(&self, session: &Session) -> Result<(), StorageError>;
    /// Remove every persisted session entry. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S: KeyValueStore> Persistence for S {
    fn load(&self) -> Option<Session> {
        let token = read_entry(self, TOKEN_KEY)?;
        let user = read_entry(self, USER_KEY)?;
        let user_id = read_entry(self, USER_ID_KEY)?;

        let claims = match serde_json::from_str::<Claims>(&user) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("Discarding persisted session with malformed claims: {}", e);
                return None;
            }
        };
        let session = match Session::new(token, claims) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding persisted session: {}", e);
                return None;
            }
        };
        // Entries written by different logins must not be combined
        if session.user_id() != user_id {
            tracing::warn!("Discarding persisted session: `userId` does not match the claims");
            return None;
        }

        Some(match TokenLease::load(self) {
            Some(lease) => session.with_lease(lease),
            None => session,
        })
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(session.claims())?;
        self.set_item(TOKEN_KEY, session.token())?;
        self.set_item(USER_KEY, &user)?;
        self.set_item(USER_ID_KEY, session.user_id())?;
        match session.lease() {
            Some(lease) => lease.save(self),
            None => TokenLease::clear(self),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        // Attempt every key even when one fails so no stale entry is left behind.
        let results = [
            self.remove_item(TOKEN_KEY),
            self.remove_item(USER_KEY),
            self.remove_item(USER_ID_KEY),
            TokenLease::clear(self),
        ];
        results.into_iter().collect()
    }
}

fn read_entry<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(Some(value)) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Failed to read persisted `{}`: {}", key, e);
            None
        }
    }
}
