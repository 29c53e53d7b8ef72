//! Parse the identity provider's redirect back to the client.
//!
//! On the web this is the page's own query string; on desktop it is whatever
//! the user pastes from the browser's address bar after signing in.

use url::Url;

use crate::error::AuthError;

/// Authorization response carried by the redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callback {
    pub code: String,
    pub state: Option<String>,
}

fn query_of(input: &str) -> String {
    let value = input.trim();
    match Url::parse(value) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => value.trim_start_matches('?').to_string(),
    }
}

/// Extract `code` and `state` from a redirect URL or bare query string.
///
/// An `error` parameter from the provider takes precedence over everything
/// else.
pub fn parse_callback(input: &str) -> Result<Callback, AuthError> {
    let query = query_of(input);

    let mut code = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::Provider(match error_description {
            Some(description) => format!("{error}: {description}"),
            None => error,
        }));
    }

    let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;
    Ok(Callback { code, state })
}

/// Whether `input` looks like a redirect that [`parse_callback`] should handle.
pub fn is_callback(input: &str) -> bool {
    let query = query_of(input);
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "code" || key == "error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_redirect_url() {
        let callback =
            parse_callback("http://localhost:5173/?state=abc&session_state=x&code=the%2Fcode")
                .unwrap();
        assert_eq!(callback.code, "the/code");
        assert_eq!(callback.state.as_deref(), Some("abc"));
    }

    #[test]
    fn test_parses_bare_query() {
        let callback = parse_callback("?code=c1&state=s1").unwrap();
        assert_eq!(callback.code, "c1");
        assert_eq!(callback.state.as_deref(), Some("s1"));
    }

    #[test]
    fn test_missing_code() {
        assert!(matches!(
            parse_callback("http://localhost:5173/?state=abc"),
            Err(AuthError::MissingCode)
        ));
    }

    #[test]
    fn test_provider_error_wins() {
        let err = parse_callback("?error=access_denied&error_description=User+cancelled&code=c")
            .unwrap_err();
        match err {
            AuthError::Provider(message) => assert_eq!(message, "access_denied: User cancelled"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_callback() {
        assert!(is_callback("?code=c1&state=s1"));
        assert!(is_callback("http://localhost:5173/?error=access_denied"));
        assert!(!is_callback(""));
        assert!(!is_callback("http://localhost:5173/activities"));
    }
}
