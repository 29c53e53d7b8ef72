//! # Token lease
//!
//! How long the current access token lives and how to renew it. A
//! [`TokenLease`] rides along with a [`Session`](crate::Session) and is
//! persisted next to it, so a restored session still knows when to renew.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `refreshToken` | refresh token, absent when the provider issued none |
//! | `expiresAt` | access token expiry, RFC 3339 |
//! | `refreshExpiresAt` | refresh token expiry, RFC 3339 |
//!
//! ## Renewal
//!
//! [`TokenLease::renewal`] decides what happens next: refresh silently
//! shortly before the access token expires while the refresh token is still
//! good, otherwise start a new login once the access token has expired.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::persistence::{KeyValueStore, StorageError};

pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const EXPIRES_AT_KEY: &str = "expiresAt";
pub const REFRESH_EXPIRES_AT_KEY: &str = "refreshExpiresAt";

/// Refresh this long before the access token expires.
pub const RENEW_MARGIN: Duration = Duration::from_secs(30);

/// Lifetime of the current access token and the means to renew it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenLease {
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TokenLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLease")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .finish()
    }
}

/// Next step for keeping the session alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Renewal {
    /// Exchange the refresh token after waiting this long.
    Refresh { after: Duration },
    /// Start a new interactive login after waiting this long.
    Relogin { after: Duration },
    /// The provider gave no expiry; nothing to schedule.
    Never,
}

impl TokenLease {
    /// Build a lease from token endpoint lifetimes, counted from `now`.
    pub fn issued(
        now: DateTime<Utc>,
        refresh_token: Option<String>,
        expires_in: Option<Duration>,
        refresh_expires_in: Option<Duration>,
    ) -> Self {
        let at = |lifetime: Duration| {
            chrono::Duration::from_std(lifetime)
                .ok()
                .and_then(|lifetime| now.checked_add_signed(lifetime))
        };
        Self {
            refresh_token,
            expires_at: expires_in.and_then(at),
            refresh_expires_at: refresh_expires_in.and_then(at),
        }
    }

    /// A refreshed lease without a new refresh token keeps the previous one.
    pub fn or_refresh_from(mut self, previous: &TokenLease) -> Self {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
            self.refresh_expires_at = previous.refresh_expires_at;
        }
        self
    }

    pub fn renewal(&self, now: DateTime<Utc>) -> Renewal {
        let Some(expires_at) = self.expires_at else {
            return Renewal::Never;
        };
        let until = |at: DateTime<Utc>| (at - now).to_std().unwrap_or(Duration::ZERO);

        let margin = chrono::Duration::from_std(RENEW_MARGIN).unwrap_or_default();
        let refresh_at = expires_at - margin;
        let refresh_usable = self.refresh_token.is_some()
            && self
                .refresh_expires_at
                .map_or(true, |refresh_expires_at| refresh_expires_at > refresh_at.max(now));

        if refresh_usable {
            Renewal::Refresh {
                after: until(refresh_at),
            }
        } else {
            Renewal::Relogin {
                after: until(expires_at),
            }
        }
    }

    pub fn save(&self, storage: &impl KeyValueStore) -> Result<(), StorageError> {
        write_optional(storage, REFRESH_TOKEN_KEY, self.refresh_token.clone())?;
        write_optional(storage, EXPIRES_AT_KEY, self.expires_at.map(|t| t.to_rfc3339()))?;
        write_optional(
            storage,
            REFRESH_EXPIRES_AT_KEY,
            self.refresh_expires_at.map(|t| t.to_rfc3339()),
        )?;
        Ok(())
    }

    /// Read a persisted lease. `None` when no lease entry is stored.
    pub fn load(storage: &impl KeyValueStore) -> Option<Self> {
        let lease = Self {
            refresh_token: read_optional(storage, REFRESH_TOKEN_KEY),
            expires_at: read_optional(storage, EXPIRES_AT_KEY).and_then(|t| parse_time(&t)),
            refresh_expires_at: read_optional(storage, REFRESH_EXPIRES_AT_KEY)
                .and_then(|t| parse_time(&t)),
        };
        (lease != Self::default()).then_some(lease)
    }

    pub fn clear(storage: &impl KeyValueStore) -> Result<(), StorageError> {
        let results = [
            storage.remove_item(REFRESH_TOKEN_KEY),
            storage.remove_item(EXPIRES_AT_KEY),
            storage.remove_item(REFRESH_EXPIRES_AT_KEY),
        ];
        results.into_iter().collect()
    }
}

fn write_optional(
    storage: &impl KeyValueStore,
    key: &str,
    value: Option<String>,
) -> Result<(), StorageError> {
    match value {
        Some(value) => storage.set_item(key, &value),
        None => storage.remove_item(key),
    }
}

fn read_optional(storage: &impl KeyValueStore, key: &str) -> Option<String> {
    storage
        .get_item(key)
        .ok()
        .flatten()
        .filter(|value| !value.is_empty())
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("Ignoring malformed lease timestamp: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_refresh_before_access_token_expires() {
        let lease = TokenLease::issued(now(), Some("r1".into()), Some(secs(300)), Some(secs(1800)));
        assert_eq!(lease.renewal(now()), Renewal::Refresh { after: secs(270) });
    }

    #[test]
    fn test_relogin_without_refresh_token() {
        let lease = TokenLease::issued(now(), None, Some(secs(300)), None);
        assert_eq!(lease.renewal(now()), Renewal::Relogin { after: secs(300) });
    }

    #[test]
    fn test_relogin_once_refresh_token_has_expired() {
        let lease = TokenLease::issued(now(), Some("r1".into()), Some(secs(300)), Some(secs(120)));
        assert_eq!(lease.renewal(now()), Renewal::Relogin { after: secs(300) });
    }

    #[test]
    fn test_overdue_lease_renews_immediately() {
        let lease = TokenLease::issued(now(), Some("r1".into()), Some(secs(300)), Some(secs(1800)));
        let later = now() + chrono::Duration::seconds(600);
        assert_eq!(lease.renewal(later), Renewal::Refresh { after: Duration::ZERO });
    }

    #[test]
    fn test_no_expiry_means_nothing_to_schedule() {
        let lease = TokenLease::issued(now(), Some("r1".into()), None, None);
        assert_eq!(lease.renewal(now()), Renewal::Never);
    }

    #[test]
    fn test_refresh_without_new_refresh_token_keeps_previous() {
        let previous = TokenLease::issued(now(), Some("r1".into()), Some(secs(300)), Some(secs(1800)));
        let renewed = TokenLease::issued(now(), None, Some(secs(300)), None).or_refresh_from(&previous);
        assert_eq!(renewed.refresh_token.as_deref(), Some("r1"));
        assert_eq!(renewed.refresh_expires_at, previous.refresh_expires_at);
    }

    #[test]
    fn test_persisted_lease_survives_reload() {
        let storage = MemoryStorage::new();
        let lease = TokenLease::issued(now(), Some("r1".into()), Some(secs(300)), None);
        lease.save(&storage).unwrap();

        assert_eq!(TokenLease::load(&storage), Some(lease));
        TokenLease::clear(&storage).unwrap();
        assert_eq!(TokenLease::load(&storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_debug_hides_refresh_token() {
        let lease = TokenLease::issued(now(), Some("secret-refresh".into()), None, None);
        assert!(!format!("{lease:?}").contains("secret-refresh"));
    }
}
