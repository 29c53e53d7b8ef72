//! Domain API facade: one method per backend endpoint.
//!
//! Every call hits the network; nothing is cached or de-duplicated.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Activity, ActivityRecord, Recommendation};

impl ApiClient {
    /// `GET /activities`, in the order the backend reports them.
    pub async fn list_activities(&self) -> Result<Vec<ActivityRecord>, ApiError> {
        let request = self.request(Method::GET, "/activities");
        self.send_json(request).await
    }

    /// `POST /activities`. Returns the stored record with its backend id.
    ///
    /// Failures are logged here and handed back to the caller unchanged.
    pub async fn create_activity(&self, activity: &Activity) -> Result<ActivityRecord, ApiError> {
        let request = self.request(Method::POST, "/activities").json(activity);
        match self.send_json::<ActivityRecord>(request).await {
            Ok(record) => {
                tracing::info!("Created {} activity {}", activity.activity_type, record.id);
                Ok(record)
            }
            Err(e) => {
                tracing::error!("Failed to create activity: {}", e);
                Err(e)
            }
        }
    }

    /// `GET /recommendations/activity/{id}` for a backend-issued activity id.
    ///
    /// The id is percent-encoded as a single path segment, so ids containing
    /// `/` or spaces cannot address another endpoint.
    pub async fn get_activity_detail(&self, id: &str) -> Result<Recommendation, ApiError> {
        if id.is_empty() {
            return Err(ApiError::EmptyId);
        }
        let path = format!("/recommendations/activity/{}", urlencoding::encode(id));
        let request = self.request(Method::GET, &path);
        self.send_json(request).await
    }
}
