//! Submitting the activity form against a mock gateway.

use api::{ActivityType, ApiClient, ApiError};
use serde_json::json;
use store::{MemoryStorage, SessionStore};
use ui::{submit_draft, ActivityDraft, DraftError, SubmitError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    let store = SessionStore::restore(MemoryStorage::new());
    store
        .set_credentials("tok123", json!({"sub": "u1"}).as_object().cloned().unwrap())
        .unwrap();
    ApiClient::new(format!("{}/api", server.uri()), store)
}

fn running(duration: &str, calories: &str) -> ActivityDraft {
    ActivityDraft {
        duration: duration.to_string(),
        calories_burned: calories.to_string(),
        ..ActivityDraft::default()
    }
}

#[tokio::test]
async fn test_accepted_activity_resets_the_draft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/activities"))
        .and(header("authorization", "Bearer tok123"))
        .and(body_json(json!({"type": "RUNNING", "duration": 30, "caloriesBurned": 250})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1", "userId": "u1", "type": "RUNNING", "duration": 30, "caloriesBurned": 250
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let next = submit_draft(&client(&mock_server), &running("30", "250"))
        .await
        .unwrap();

    assert_eq!(next, ActivityDraft::default());
    assert_eq!(next.activity_type, ActivityType::Running);
}

#[tokio::test]
async fn test_rejected_activity_keeps_the_draft() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut draft = running("45", "300");
    draft.activity_type = ActivityType::Cycling;
    let before = draft.clone();

    let err = submit_draft(&client(&mock_server), &draft).await.unwrap_err();

    assert!(matches!(err, SubmitError::Api(ApiError::Status { status: 500, .. })));
    assert!(err.to_string().starts_with("Could not save activity"));
    assert_eq!(draft, before);
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let mock_server = MockServer::start().await;

    let err = submit_draft(&client(&mock_server), &running("0", "100"))
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Invalid(DraftError::InvalidDuration)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
