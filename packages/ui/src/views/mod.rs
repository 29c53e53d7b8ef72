//! Routed pages shared by the web and desktop apps.

use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::gate::{resolve, View};

mod activities;
mod activity_detail;
mod login;

pub use activities::Activities;
pub use activity_detail::{ActivityDetail, ActivityDetailPage};
pub use login::LoginView;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/activities")]
        Activities {},
        #[route("/activities/:id")]
        ActivityDetailPage { id: String },
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

/// App chrome plus the authentication gate around every route.
#[component]
fn Shell() -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let view = resolve(auth.read().gate(), &route);
    let user_name = auth
        .read()
        .session
        .as_ref()
        .map(|session| session.display_name().to_string());
    let body = match view {
        View::Login => rsx! { LoginView {} },
        View::Redirect(target) => {
            nav.replace(target);
            rsx! {}
        }
        View::Activities | View::ActivityDetail { .. } | View::NotFound => rsx! {
            header {
                class: "app-header",
                Link { to: Route::Activities {}, h1 { "Fitness Tracker" } }
                if let Some(name) = user_name {
                    span { class: "app-user", "{name}" }
                }
                LogoutButton { class: "logout-btn" }
            }
            main {
                class: "app-main",
                Outlet::<Route> {}
            }
        },
    };

    rsx! {
        {body}
        style {
            r#"
            body {{
                margin: 0;
                font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
                color: #37352f;
                background: #f7f7f5;
            }}

            .app-header {{
                display: flex;
                align-items: center;
                gap: 1rem;
                padding: 0.75rem 1.5rem;
                background: #ffffff;
                border-bottom: 1px solid #e9e9e7;
            }}

            .app-header a {{
                color: inherit;
                text-decoration: none;
                flex: 1;
            }}

            .app-header h1 {{
                margin: 0;
                font-size: 1.25rem;
            }}

            .app-user {{
                color: #787774;
                font-size: 0.875rem;
            }}

            .app-main {{
                max-width: 720px;
                margin: 0 auto;
                padding: 1.5rem;
            }}

            .logout-btn, .login-btn, .activity-form button {{
                padding: 0.5rem 1rem;
                border: none;
                border-radius: 4px;
                background: #2383e2;
                color: white;
                cursor: pointer;
            }}

            button:disabled {{
                opacity: 0.5;
                cursor: not-allowed;
            }}

            .activity-form {{
                display: flex;
                flex-direction: column;
                gap: 0.75rem;
                padding: 1rem;
                margin-bottom: 1.5rem;
                background: #ffffff;
                border-radius: 6px;
            }}

            .activity-form label {{
                display: flex;
                flex-direction: column;
                gap: 0.25rem;
                font-size: 0.875rem;
            }}

            .form-error {{
                color: #e03e3e;
                margin: 0;
            }}

            .activity-list {{
                list-style: none;
                padding: 0;
                display: flex;
                flex-direction: column;
                gap: 0.75rem;
            }}

            .activity-card a {{
                display: block;
                padding: 1rem;
                background: #ffffff;
                border-radius: 6px;
                color: inherit;
                text-decoration: none;
            }}

            .activity-card h3 {{
                margin: 0 0 0.5rem;
            }}

            .activity-card p {{
                margin: 0.125rem 0;
                color: #787774;
            }}
            "#
        }
    }
}

/// Never rendered: the gate redirects `/` before the outlet is reached.
#[component]
fn Root() -> Element {
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "not-found",
            h2 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Activities {}, "Back to activities" }
        }
    }
}
