//! # Client configuration (`config.toml`)
//!
//! Where the backend lives, how to reach the identity provider, and how the
//! activities page refreshes after a create.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//!
//! [auth]
//! client_id = "oauth2-pkce-client"
//! authorization_endpoint = "http://localhost:8181/realms/fitness-app/protocol/openid-connect/auth"
//! token_endpoint = "http://localhost:8181/realms/fitness-app/protocol/openid-connect/token"
//! redirect_uri = "http://localhost:5173"
//! scopes = ["openid", "profile", "email", "offline_access"]
//! relogin_on_expiry = true
//!
//! [activities]
//! refresh_strategy = "refetch"   # or "full_reload"
//! ```
//!
//! Every section derives `Default`, so a missing or partial file is the
//! default configuration. Environment variables (`FITNESS_*`) override file
//! values; see [`AppConfig::with_overrides`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_REALM: &str = "http://localhost:8181/realms/fitness-app";

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub activities: ActivitiesConfig,
}

/// Backend gateway configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Identity provider configuration for the authorization-code + PKCE flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub client_id: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    /// Start a fresh login when the access token expires and cannot be
    /// refreshed.
    pub relogin_on_expiry: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: "oauth2-pkce-client".to_string(),
            authorization_endpoint: format!("{DEFAULT_REALM}/protocol/openid-connect/auth"),
            token_endpoint: format!("{DEFAULT_REALM}/protocol/openid-connect/token"),
            redirect_uri: "http://localhost:5173".to_string(),
            scopes: ["openid", "profile", "email", "offline_access"]
                .map(str::to_string)
                .to_vec(),
            relogin_on_expiry: true,
        }
    }
}

/// Activities page configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitiesConfig {
    #[serde(default)]
    pub refresh_strategy: RefreshStrategy,
}

/// What happens to the activities page after a successful create.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStrategy {
    /// Re-run the list query in place.
    #[default]
    Refetch,
    /// Reload the whole page (web) or remount the page content (desktop).
    FullReload,
}

impl std::str::FromStr for RefreshStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "refetch" => Ok(Self::Refetch),
            "full_reload" | "reload" => Ok(Self::FullReload),
            other => Err(ConfigError::Invalid(format!(
                "unknown refresh strategy `{other}`"
            ))),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "config.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply `FITNESS_*` overrides looked up through `var`.
    pub fn with_overrides(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = var("FITNESS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(client_id) = var("FITNESS_AUTH_CLIENT_ID") {
            self.auth.client_id = client_id;
        }
        if let Some(url) = var("FITNESS_AUTH_URL") {
            self.auth.authorization_endpoint = url;
        }
        if let Some(url) = var("FITNESS_TOKEN_URL") {
            self.auth.token_endpoint = url;
        }
        if let Some(uri) = var("FITNESS_REDIRECT_URI") {
            self.auth.redirect_uri = uri;
        }
        if let Some(strategy) = var("FITNESS_REFRESH_STRATEGY") {
            self.activities.refresh_strategy = strategy.parse()?;
        }
        Ok(self)
    }

    /// Load `path` if it exists, then apply environment overrides (including a
    /// `.env` file in the working directory).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base = match path {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_toml(&std::fs::read_to_string(path)?)?
            }
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }
}
