//! This crate contains all shared UI for the workspace.

pub mod platform;

mod auth;
pub use auth::{
    begin_login, complete_login, use_api, use_auth, use_identity, use_session_store,
    AuthProvider, AuthState, Identity, LoginButton, LogoutButton,
};

pub mod gate;
pub use gate::{resolve, AuthGate, View};

mod activity_form;
pub use activity_form::{submit_draft, ActivityDraft, ActivityForm, DraftError, SubmitError};

mod activity_list;
pub use activity_list::ActivityList;

pub mod views;
pub use views::Route;
