//! Error types for the API crate.

use thiserror::Error;

/// Failures talking to the backend gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("activity id must not be empty")]
    EmptyId,
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures in the identity provider flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid identity provider configuration: {0}")]
    Config(String),
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("access token claims could not be read: {0}")]
    Claims(String),
    #[error("identity provider returned an error: {0}")]
    Provider(String),
    #[error("redirect did not carry an authorization code")]
    MissingCode,
    #[error("redirect state does not match the pending login")]
    StateMismatch,
    #[error("no login is in progress")]
    NoPendingLogin,
    #[error(transparent)]
    Session(#[from] store::SessionError),
}

/// Failures loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
