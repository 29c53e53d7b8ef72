//! Authentication against the external identity provider.

mod callback;
mod claims;
mod config;
mod provider;

pub use callback::{is_callback, parse_callback, Callback};
pub use claims::decode_claims;
pub use config::OAuthConfig;
pub use provider::{AuthorizationRequest, IdentityProvider, TokenGrant};
