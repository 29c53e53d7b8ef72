//! In-flight login state kept across the identity provider redirect.

use crate::persistence::{KeyValueStore, StorageError};

pub const PKCE_STATE_KEY: &str = "pkce_state";
pub const PKCE_VERIFIER_KEY: &str = "pkce_verifier";

/// CSRF state and PKCE verifier for a login that has left for the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingLogin {
    pub state: String,
    pub verifier: String,
}

impl std::fmt::Debug for PendingLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLogin")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PendingLogin {
    pub fn save(&self, storage: &impl KeyValueStore) -> Result<(), StorageError> {
        storage.set_item(PKCE_STATE_KEY, &self.state)?;
        storage.set_item(PKCE_VERIFIER_KEY, &self.verifier)?;
        Ok(())
    }

    /// Read and remove the pending login. A login can only be completed once.
    pub fn take(storage: &impl KeyValueStore) -> Option<Self> {
        let state = storage.get_item(PKCE_STATE_KEY).ok().flatten();
        let verifier = storage.get_item(PKCE_VERIFIER_KEY).ok().flatten();
        for key in [PKCE_STATE_KEY, PKCE_VERIFIER_KEY] {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!("Failed to remove `{}`: {}", key, e);
            }
        }
        Some(Self {
            state: state.filter(|s| !s.is_empty())?,
            verifier: verifier.filter(|v| !v.is_empty())?,
        })
    }
}
