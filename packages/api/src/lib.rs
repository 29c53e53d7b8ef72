//! # API crate: everything that talks to the outside world
//!
//! The web and desktop frontends reach the backend gateway and the identity
//! provider only through this crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: attaches `Authorization` / `X-User-ID` from the current session to every request |
//! | [`activities`] | Domain facade: `list_activities`, `create_activity`, `get_activity_detail` |
//! | [`auth`] | Authorization code + PKCE login against the identity provider, redirect parsing, claim decoding |
//! | [`config`] | [`AppConfig`]: backend URL, identity provider endpoints, refresh strategy |
//! | [`models`] | Wire types: [`Activity`], [`ActivityRecord`], [`Recommendation`] |
//! | [`error`] | [`ApiError`], [`AuthError`], [`ConfigError`] |
//!
//! ## Backend endpoints
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | `GET` | `/activities` | `Vec<ActivityRecord>` |
//! | `POST` | `/activities` | `ActivityRecord` |
//! | `GET` | `/recommendations/activity/{id}` | `Recommendation` |

pub mod activities;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::{IdentityProvider, TokenGrant};
pub use client::{auth_headers, ApiClient};
pub use config::{AppConfig, AuthConfig, RefreshStrategy};
pub use error::{ApiError, AuthError, ConfigError};
pub use models::{Activity, ActivityRecord, ActivityType, Recommendation};
