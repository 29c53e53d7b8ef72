//! # Recommendation model
//!
//! The detail resource behind `GET /recommendations/activity/{id}`: an analysis
//! the backend generated for one activity, with lists of improvements,
//! workout suggestions and safety guidelines. Lists the backend leaves `null`
//! decode as empty.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Backend-generated analysis of a single activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub activity_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub improvements: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub safety: Vec<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Recommendation {
    /// Analysis text split into its paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.recommendation
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_recommendation() {
        let rec: Recommendation = serde_json::from_value(json!({
            "id": "r1",
            "activityId": "42",
            "userId": "u1",
            "type": "RUNNING",
            "recommendation": "Overall:Good pace\n\nPace:Steady\n\n",
            "improvements": ["Cadence: add strides"],
            "suggestions": ["Intervals: 6x400m"],
            "safety": ["Stay hydrated"],
            "createdAt": "2025-03-01T08:20:00"
        }))
        .unwrap();

        assert_eq!(rec.activity_id.as_deref(), Some("42"));
        assert_eq!(
            rec.paragraphs().collect::<Vec<_>>(),
            vec!["Overall:Good pace", "Pace:Steady"]
        );
        assert_eq!(rec.safety, vec!["Stay hydrated"]);
    }

    #[test]
    fn test_null_lists_decode_empty() {
        let rec: Recommendation = serde_json::from_value(json!({
            "recommendation": "Unable to generate detailed analysis",
            "improvements": null
        }))
        .unwrap();

        assert!(rec.improvements.is_empty());
        assert!(rec.suggestions.is_empty());
        assert!(rec.safety.is_empty());
    }
}
