//! Form for recording a new activity.

use api::{Activity, ActivityType, ApiClient, ApiError};
use dioxus::prelude::*;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::auth::use_api;

/// Unsubmitted form contents. Numeric fields stay as typed until submit.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityDraft {
    pub activity_type: ActivityType,
    pub duration: String,
    pub calories_burned: String,
    pub additional_metrics: Map<String, Value>,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self {
            activity_type: ActivityType::Running,
            duration: String::new(),
            calories_burned: String::new(),
            additional_metrics: Map::new(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Duration must be a positive number of minutes")]
    InvalidDuration,
    #[error("Calories burned must be a non-negative number")]
    InvalidCalories,
}

impl ActivityDraft {
    pub fn to_activity(&self) -> Result<Activity, DraftError> {
        let duration = self
            .duration
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or(DraftError::InvalidDuration)?;
        let calories_burned = self
            .calories_burned
            .trim()
            .parse::<u32>()
            .map_err(|_| DraftError::InvalidCalories)?;

        Ok(Activity {
            activity_type: self.activity_type,
            duration,
            calories_burned,
            additional_metrics: self.additional_metrics.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error("Could not save activity: {0}")]
    Api(#[from] ApiError),
}

/// Validate and post a draft. On success returns the draft the form should
/// show next: an empty running entry. On failure the caller keeps its draft.
pub async fn submit_draft(
    api: &ApiClient,
    draft: &ActivityDraft,
) -> Result<ActivityDraft, SubmitError> {
    let activity = draft.to_activity()?;
    api.create_activity(&activity).await?;
    Ok(ActivityDraft::default())
}

/// Activity entry form. Calls `on_activity_added` after the backend accepts
/// the activity, then resets to an empty running entry. A failed submit
/// keeps what the user typed.
#[component]
pub fn ActivityForm(on_activity_added: EventHandler<()>) -> Element {
    let api = use_api();
    let mut draft = use_signal(ActivityDraft::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        async move {
            let current = draft();
            submitting.set(true);
            match submit_draft(&api, &current).await {
                Ok(next) => {
                    on_activity_added.call(());
                    draft.set(next);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        }
    };

    let current = draft();

    rsx! {
        form {
            class: "activity-form",
            onsubmit: handle_submit,

            label {
                "Activity type"
                select {
                    value: "{current.activity_type.as_str()}",
                    onchange: move |evt| {
                        if let Ok(kind) = evt.value().parse::<ActivityType>() {
                            draft.write().activity_type = kind;
                        }
                    },
                    for kind in ActivityType::ALL {
                        option {
                            value: "{kind.as_str()}",
                            selected: kind == current.activity_type,
                            "{kind.label()}"
                        }
                    }
                }
            }

            label {
                "Duration (minutes)"
                input {
                    r#type: "number",
                    min: "1",
                    value: "{current.duration}",
                    oninput: move |evt| draft.write().duration = evt.value(),
                }
            }

            label {
                "Calories burned"
                input {
                    r#type: "number",
                    min: "0",
                    value: "{current.calories_burned}",
                    oninput: move |evt| draft.write().calories_burned = evt.value(),
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }

            button {
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Saving..." } else { "Add activity" }
            }
        }
    }
}
