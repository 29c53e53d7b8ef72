use api::ActivityRecord;
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::views::Route;

/// The signed-in user's activities, in backend order.
///
/// Fetches on mount and again whenever `refresh` changes. A failed fetch is
/// logged and leaves the list empty.
#[component]
pub fn ActivityList(refresh: ReadOnlySignal<u32>) -> Element {
    let api = use_api();

    let activities = use_resource(move || {
        let generation = refresh();
        let api = api.clone();
        async move {
            match api.list_activities().await {
                Ok(list) => list,
                Err(e) => {
                    tracing::error!("Failed to load activities (refresh {}): {}", generation, e);
                    Vec::new()
                }
            }
        }
    });

    let Some(list) = activities() else {
        return rsx! {
            p { class: "activity-list-status", "Loading activities..." }
        };
    };

    if list.is_empty() {
        return rsx! {
            p { class: "activity-list-status", "No activities yet." }
        };
    }

    rsx! {
        ul {
            class: "activity-list",
            for record in list {
                ActivityCard { key: "{record.id}", record: record.clone() }
            }
        }
    }
}

#[component]
fn ActivityCard(record: ActivityRecord) -> Element {
    let duration = record
        .duration
        .map_or("-".to_string(), |minutes| format!("{minutes} min"));
    let calories = record
        .calories_burned
        .map_or("-".to_string(), |kcal| format!("{kcal} kcal"));
    let started = record
        .start_time
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string());

    rsx! {
        li {
            class: "activity-card",
            Link {
                to: Route::ActivityDetailPage { id: record.id.clone() },
                h3 { "{record.type_label()}" }
                p { "Duration: {duration}" }
                p { "Calories: {calories}" }
                if let Some(started) = started {
                    p { class: "activity-time", "{started}" }
                }
            }
        }
    }
}
