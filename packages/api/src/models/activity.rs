//! # Activity models
//!
//! Two representations of a fitness activity:
//!
//! ## [`Activity`]
//!
//! The payload the client constructs and sends once via `POST /activities`.
//! It serialises with the backend's camelCase field names and uses `type` as
//! the discriminator:
//!
//! ```json
//! {"type": "RUNNING", "duration": 30, "caloriesBurned": 250}
//! ```
//!
//! `additionalMetrics` is omitted from the body when empty.
//!
//! ## [`ActivityRecord`]
//!
//! What the backend returns: the stored activity plus its backend-assigned
//! `id`, owning `userId` and audit timestamps. The client only ever holds
//! transient copies for display, so fields the backend may leave `null` are
//! optional and unknown fields are ignored.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    #[default]
    Running,
    Walking,
    Cycling,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [Self::Running, Self::Walking, Self::Cycling];

    /// Wire name, e.g. `"RUNNING"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Walking => "WALKING",
            Self::Cycling => "CYCLING",
        }
    }

    /// Label for display, e.g. `"Running"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Walking => "Walking",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown activity type `{s}`"))
    }
}

/// Create payload for a new activity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Duration in minutes. Always positive.
    pub duration: u32,
    pub calories_burned: u32,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub additional_metrics: Map<String, Value>,
}

/// An activity as stored and reported by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Kept as text so activity kinds this client does not know still list.
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub additional_metrics: Option<Map<String, Value>>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl ActivityRecord {
    /// The activity kind, if it is one this client knows.
    pub fn kind(&self) -> Option<ActivityType> {
        self.activity_type.parse().ok()
    }

    /// Label for display, falling back to the raw backend value.
    pub fn type_label(&self) -> &str {
        self.kind().map_or(self.activity_type.as_str(), |kind| kind.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_wire_shape() {
        let activity = Activity {
            activity_type: ActivityType::Running,
            duration: 30,
            calories_burned: 250,
            additional_metrics: Map::new(),
        };
        assert_eq!(
            serde_json::to_value(&activity).unwrap(),
            json!({"type": "RUNNING", "duration": 30, "caloriesBurned": 250})
        );
    }

    #[test]
    fn test_activity_keeps_non_empty_metrics() {
        let mut metrics = Map::new();
        metrics.insert("distanceKm".to_string(), json!(5.2));
        let activity = Activity {
            activity_type: ActivityType::Cycling,
            duration: 45,
            calories_burned: 0,
            additional_metrics: metrics,
        };
        assert_eq!(
            serde_json::to_value(&activity).unwrap()["additionalMetrics"],
            json!({"distanceKm": 5.2})
        );
    }

    #[test]
    fn test_record_from_backend_response() {
        let record: ActivityRecord = serde_json::from_value(json!({
            "id": "665f1c",
            "userId": "u1",
            "type": "WALKING",
            "duration": 20,
            "caloriesBurned": 90,
            "startTime": null,
            "additionalMetrics": null,
            "createdAt": "2025-03-01T08:15:30.123",
            "updatedAt": "2025-03-01T08:15:30.123"
        }))
        .unwrap();

        assert_eq!(record.id, "665f1c");
        assert_eq!(record.kind(), Some(ActivityType::Walking));
        assert_eq!(record.type_label(), "Walking");
        assert_eq!(record.duration, Some(20));
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_record_with_unknown_type_still_decodes() {
        let record: ActivityRecord =
            serde_json::from_value(json!({"id": "1", "type": "SWIMMING"})).unwrap();
        assert_eq!(record.kind(), None);
        assert_eq!(record.type_label(), "SWIMMING");
    }

    #[test]
    fn test_activity_type_parse() {
        assert_eq!("CYCLING".parse::<ActivityType>(), Ok(ActivityType::Cycling));
        assert!("cycling".parse::<ActivityType>().is_err());
    }
}
