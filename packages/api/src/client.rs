//! # Authenticated request client
//!
//! Every call to the backend goes through [`ApiClient::request`], which reads
//! the current session from the shared [`SessionStore`] at build time and
//! merges the headers returned by [`auth_headers`]:
//!
//! | Header | Present when |
//! |--------|--------------|
//! | `Authorization: Bearer <token>` | a session exists |
//! | `X-User-ID: <subject>` | a session exists |
//!
//! Requests made while signed out go out without either header; the backend
//! is the enforcement point. There is no retry and no refresh-on-401.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use store::{Session, SessionStore};

use crate::error::ApiError;

/// Header carrying the subject identifier.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Headers that authenticate a request for `session`.
///
/// Returns an empty map when signed out. A [`Session`] never holds an empty
/// token or subject, so neither header is ever sent blank.
pub fn auth_headers(session: Option<&Session>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Some(session) = session else {
        return headers;
    };

    match HeaderValue::from_str(&format!("Bearer {}", session.token())) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => tracing::warn!("Bearer token is not a valid header value; omitting it"),
    }
    match HeaderValue::from_str(session.user_id()) {
        Ok(value) => {
            headers.insert(USER_ID_HEADER, value);
        }
        Err(_) => tracing::warn!("Subject identifier is not a valid header value; omitting it"),
    }

    headers
}

/// HTTP client for the backend gateway, bound to a session store.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, session)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: SessionStore,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Absolute URL for an endpoint path such as `/activities`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the current session's headers attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let session = self.session.get();
        self.http
            .request(method, self.url(path))
            .headers(auth_headers(session.as_ref()))
    }

    /// Send `request` and decode a JSON body from a 2xx response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
