use api::{AppConfig, RefreshStrategy};
use dioxus::prelude::*;

use crate::activity_form::ActivityForm;
use crate::activity_list::ActivityList;
use crate::platform;

/// Entry form above the activity list.
#[component]
pub fn Activities() -> Element {
    let config = use_context::<AppConfig>();
    let strategy = config.activities.refresh_strategy;
    let mut refresh = use_signal(|| 0u32);
    // Bumped to remount the page where there is no browser page to reload
    let mut epoch = use_signal(|| 0u32);

    let on_activity_added = move |_: ()| match strategy {
        RefreshStrategy::Refetch => refresh += 1,
        RefreshStrategy::FullReload => {
            if !platform::reload_page() {
                epoch += 1;
            }
        }
    };

    rsx! {
        div {
            key: "{epoch}",
            class: "activities-page",
            ActivityForm { on_activity_added }
            h2 { "Your activities" }
            ActivityList { refresh: refresh() }
        }
    }
}
