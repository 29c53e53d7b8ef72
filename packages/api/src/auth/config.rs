//! Typed OAuth endpoints built from [`AuthConfig`].

use oauth2::{AuthUrl, ClientId, RedirectUrl, Scope, TokenUrl};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Identity provider endpoints, validated as URLs.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
    pub scopes: Vec<Scope>,
}

impl OAuthConfig {
    /// Validate the plain-text configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.client_id.is_empty() {
            return Err(AuthError::Config("client_id is empty".to_string()));
        }

        Ok(Self {
            client_id: ClientId::new(config.client_id.clone()),
            auth_url: AuthUrl::new(config.authorization_endpoint.clone())
                .map_err(|e| AuthError::Config(format!("authorization_endpoint: {e}")))?,
            token_url: TokenUrl::new(config.token_endpoint.clone())
                .map_err(|e| AuthError::Config(format!("token_endpoint: {e}")))?,
            redirect_url: RedirectUrl::new(config.redirect_uri.clone())
                .map_err(|e| AuthError::Config(format!("redirect_uri: {e}")))?,
            scopes: config.scopes.iter().cloned().map(Scope::new).collect(),
        })
    }
}
