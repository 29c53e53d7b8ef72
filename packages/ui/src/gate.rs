//! Route gating: which view a route shows for the current authentication state.

use store::Session;

use crate::views::Route;

/// Authentication state as seen by the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthGate {
    Unauthenticated,
    Authenticated,
}

impl AuthGate {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(_) => AuthGate::Authenticated,
            None => AuthGate::Unauthenticated,
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == AuthGate::Authenticated
    }
}

/// What the shell renders for a route.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    /// Only the login affordance; no protected route is reachable.
    Login,
    /// Replace the current route.
    Redirect(Route),
    Activities,
    ActivityDetail { id: String },
    NotFound,
}

/// Resolve a route against the authentication state.
///
/// Signed out, every route shows the login view. Signed in, `/` redirects to
/// `/activities` and unknown paths show the not-found view.
pub fn resolve(gate: AuthGate, route: &Route) -> View {
    if !gate.is_authenticated() {
        return View::Login;
    }
    match route {
        Route::Root {} => View::Redirect(Route::Activities {}),
        Route::Activities {} => View::Activities,
        Route::ActivityDetailPage { id } => View::ActivityDetail { id: id.clone() },
        Route::NotFound { .. } => View::NotFound,
    }
}
