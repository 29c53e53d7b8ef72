use api::Recommendation;
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::views::Route;

#[component]
pub fn ActivityDetailPage(id: String) -> Element {
    rsx! {
        ActivityDetail { id }
    }
}

/// Recommendation and analysis for one activity.
#[component]
pub fn ActivityDetail(id: ReadOnlySignal<String>) -> Element {
    let api = use_api();

    let detail = use_resource(move || {
        let id = id();
        let api = api.clone();
        async move {
            api.get_activity_detail(&id)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to load activity {}: {}", id, e);
                    e.to_string()
                })
        }
    });

    let body = match detail() {
        None => rsx! { p { "Loading analysis..." } },
        Some(Err(message)) => rsx! {
            p { class: "form-error", "Could not load this activity: {message}" }
        },
        Some(Ok(recommendation)) => rsx! { RecommendationView { recommendation } },
    };

    rsx! {
        div {
            class: "activity-detail",
            Link { to: Route::Activities {}, "Back to activities" }
            {body}
        }
    }
}

#[component]
fn RecommendationView(recommendation: Recommendation) -> Element {
    let kind = recommendation
        .activity_type
        .clone()
        .unwrap_or_else(|| "Activity".to_string());

    rsx! {
        h2 { "{kind} analysis" }
        section {
            for paragraph in recommendation.paragraphs() {
                p { "{paragraph}" }
            }
        }
        GuidanceList { title: "Improvements", items: recommendation.improvements.clone() }
        GuidanceList { title: "Suggestions", items: recommendation.suggestions.clone() }
        GuidanceList { title: "Safety guidelines", items: recommendation.safety.clone() }
    }
}

#[component]
fn GuidanceList(title: String, items: Vec<String>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        section {
            h3 { "{title}" }
            ul {
                for item in items {
                    li { "{item}" }
                }
            }
        }
    }
}
