//! # Session model
//!
//! A [`Session`] is the complete authenticated identity of the client: the
//! subject identifier, the raw identity claims issued by the provider, and the
//! bearer token. The store holds `Option<Session>`, so the "all three or none"
//! rule is enforced by the type rather than checked at runtime. An optional
//! [`TokenLease`] records when the token expires and how to renew it.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::lease::TokenLease;

/// Raw identity claims as issued by the identity provider.
pub type Claims = Map<String, Value>;

/// Claim carrying the subject identifier.
pub const SUBJECT_CLAIM: &str = "sub";

/// An authenticated session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    user_id: String,
    claims: Claims,
    token: String,
    lease: Option<TokenLease>,
}

/// Reasons [`Session::new`] rejects its input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("bearer token is empty")]
    EmptyToken,
    #[error("identity claims carry no subject identifier")]
    MissingSubject,
}

impl Session {
    /// Build a session from a token and the claims that came with it.
    ///
    /// The subject identifier is taken from `claims.sub`, which must be a
    /// non-empty string.
    pub fn new(token: impl Into<String>, claims: Claims) -> Result<Self, SessionError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        let user_id = subject_of(&claims).ok_or(SessionError::MissingSubject)?;
        Ok(Self {
            user_id,
            claims,
            token,
            lease: None,
        })
    }

    pub fn with_lease(mut self, lease: TokenLease) -> Self {
        self.lease = Some(lease);
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn lease(&self) -> Option<&TokenLease> {
        self.lease.as_ref()
    }

    /// Human-friendly name from the claims, falling back to the subject.
    pub fn display_name(&self) -> &str {
        ["name", "preferred_username", "email"]
            .iter()
            .find_map(|key| self.claims.get(*key).and_then(Value::as_str))
            .unwrap_or(&self.user_id)
    }
}

fn subject_of(claims: &Claims) -> Option<String> {
    claims
        .get(SUBJECT_CLAIM)
        .and_then(Value::as_str)
        .filter(|sub| !sub.is_empty())
        .map(str::to_string)
}
