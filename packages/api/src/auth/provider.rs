//! # Identity provider (OAuth 2.0 authorization code + PKCE)
//!
//! The client is public: it holds no secret and proves possession of the
//! authorization code with a PKCE verifier instead.
//!
//! ## Flow
//!
//! 1. **[`authorize`](IdentityProvider::authorize)** builds the authorization
//!    URL with the configured scopes, a random CSRF state and an S256 PKCE
//!    challenge. The returned [`PendingLogin`] must be persisted by the caller,
//!    because on the web the page is replaced by the provider's login screen.
//!
//! 2. The provider redirects back to the configured redirect URI with `code`
//!    and `state`.
//!
//! 3. **[`complete_login`](IdentityProvider::complete_login)** parses that
//!    redirect, checks `state` against the pending login, and exchanges the
//!    code + verifier at the token endpoint. The resulting [`TokenGrant`]
//!    carries the access token, its decoded claims and the refresh token,
//!    ready for `SessionStore::set_credentials_with_lease`.
//!
//! 4. **[`refresh`](IdentityProvider::refresh)** trades the refresh token for
//!    a new access token before the old one expires. Only when that fails, or
//!    the refresh token itself has expired, does the user log in again.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use oauth2::basic::BasicTokenType;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, ExtraTokenFields,
    PkceCodeChallenge, PkceCodeVerifier, RefreshToken, StandardTokenResponse, TokenResponse,
};
use serde::{Deserialize, Serialize};
use store::{Claims, PendingLogin, TokenLease};

use super::callback::parse_callback;
use super::claims::decode_claims;
use super::config::OAuthConfig;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Non-standard token response fields the provider sends.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderTokenFields {
    /// Refresh token lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<u64>,
}

impl ExtraTokenFields for ProviderTokenFields {}

type ProviderTokenResponse = StandardTokenResponse<ProviderTokenFields, BasicTokenType>;

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    ProviderTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// An authorization URL plus the state needed to finish the login.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub pending: PendingLogin,
}

/// Tokens issued by the provider.
#[derive(Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: Option<Duration>,
    pub refresh_token: Option<String>,
    pub refresh_expires_in: Option<Duration>,
    pub claims: Claims,
}

impl TokenGrant {
    /// Expiry and refresh state of this grant, counted from `now`.
    pub fn lease(&self, now: DateTime<Utc>) -> TokenLease {
        TokenLease::issued(
            now,
            self.refresh_token.clone(),
            self.expires_in,
            self.refresh_expires_in,
        )
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("expires_in", &self.expires_in)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("refresh_expires_in", &self.refresh_expires_in)
            .field("sub", &self.claims.get(store::session::SUBJECT_CLAIM))
            .finish_non_exhaustive()
    }
}

/// Identity provider handler.
#[derive(Clone)]
pub struct IdentityProvider {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl fmt::Debug for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IdentityProvider {
    /// Create a handler for the configured provider.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let config = OAuthConfig::from_config(config)?;

        // Token endpoints must not redirect: following one could leak the code.
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Config(e.to_string()))?;
        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();

        Ok(Self { config, http })
    }

    fn create_client(&self) -> ConfiguredClient {
        oauth2::Client::new(self.config.client_id.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate the authorization URL with PKCE.
    pub fn authorize(&self) -> AuthorizationRequest {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.config.scopes.iter().cloned())
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            pending: PendingLogin {
                state: csrf_state.secret().clone(),
                verifier: pkce_verifier.secret().clone(),
            },
        }
    }

    /// Exchange an authorization code and PKCE verifier for tokens.
    pub async fn exchange_code(&self, code: &str, verifier: &str) -> Result<TokenGrant, AuthError> {
        let client = self.create_client();

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        into_grant(token_result)
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        let client = self.create_client();
        let refresh_token = RefreshToken::new(refresh_token.to_string());

        let token_result = client
            .exchange_refresh_token(&refresh_token)
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        into_grant(token_result)
    }

    /// Finish a login from the provider's redirect.
    pub async fn complete_login(
        &self,
        redirect: &str,
        pending: Option<PendingLogin>,
    ) -> Result<TokenGrant, AuthError> {
        let callback = parse_callback(redirect)?;
        let pending = pending.ok_or(AuthError::NoPendingLogin)?;
        if callback.state.as_deref() != Some(pending.state.as_str()) {
            return Err(AuthError::StateMismatch);
        }
        self.exchange_code(&callback.code, &pending.verifier).await
    }
}

fn into_grant(token_result: ProviderTokenResponse) -> Result<TokenGrant, AuthError> {
    let access_token = token_result.access_token().secret().clone();
    let claims = decode_claims(&access_token)?;

    Ok(TokenGrant {
        access_token,
        expires_in: token_result.expires_in(),
        refresh_token: token_result.refresh_token().map(|t| t.secret().clone()),
        refresh_expires_in: token_result
            .extra_fields()
            .refresh_expires_in
            .map(Duration::from_secs),
        claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_authorize_url_carries_pkce_and_scopes() {
        let provider = IdentityProvider::new(&AuthConfig::default()).unwrap();
        let request = provider.authorize();

        let url = url::Url::parse(&request.url).unwrap();
        assert!(request
            .url
            .starts_with("http://localhost:8181/realms/fitness-app/protocol/openid-connect/auth?"));

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "oauth2-pkce-client");
        assert_eq!(params["redirect_uri"], "http://localhost:5173");
        assert_eq!(params["scope"], "openid profile email offline_access");
        assert_eq!(params["code_challenge_method"], "S256");
        assert_eq!(params["state"], request.pending.state);
        assert!(!params["code_challenge"].is_empty());
        assert_ne!(params["code_challenge"], request.pending.verifier);
    }

    #[test]
    fn test_each_login_gets_fresh_state() {
        let provider = IdentityProvider::new(&AuthConfig::default()).unwrap();
        let first = provider.authorize().pending;
        let second = provider.authorize().pending;
        assert_ne!(first.state, second.state);
        assert_ne!(first.verifier, second.verifier);
    }
}
