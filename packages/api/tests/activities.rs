//! Integration tests for the activity endpoints against a mock gateway.

use api::{Activity, ActivityType, ApiClient, ApiError};
use serde_json::{json, Map};
use store::{MemoryStorage, SessionStore};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in_store() -> SessionStore {
    let store = SessionStore::restore(MemoryStorage::new());
    store
        .set_credentials("tok123", json!({"sub": "u1", "name": "A"}).as_object().cloned().unwrap())
        .unwrap();
    store
}

fn client(server: &MockServer, store: SessionStore) -> ApiClient {
    ApiClient::new(format!("{}/api", server.uri()), store)
}

#[tokio::test]
async fn test_list_activities_sends_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/activities"))
        .and(header("authorization", "Bearer tok123"))
        .and(header("x-user-id", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "b", "userId": "u1", "type": "CYCLING", "duration": 60, "caloriesBurned": 500},
            {"id": "a", "userId": "u1", "type": "RUNNING", "duration": 30, "caloriesBurned": 250}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let activities = client(&mock_server, signed_in_store())
        .list_activities()
        .await
        .unwrap();

    // Backend order is preserved
    let ids: Vec<_> = activities.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(activities[1].kind(), Some(ActivityType::Running));
}

#[tokio::test]
async fn test_signed_out_requests_omit_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let store = SessionStore::restore(MemoryStorage::new());
    let err = client(&mock_server, store).list_activities().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("x-user-id").is_none());
}

#[tokio::test]
async fn test_logout_stops_sending_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = signed_in_store();
    let api = client(&mock_server, store.clone());
    api.list_activities().await.unwrap();
    store.logout();
    api.list_activities().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers.get("authorization").unwrap(), "Bearer tok123");
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_create_activity_posts_exact_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/activities"))
        .and(header("authorization", "Bearer tok123"))
        .and(body_json(json!({"type": "RUNNING", "duration": 30, "caloriesBurned": 250})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "665f1c",
            "userId": "u1",
            "type": "RUNNING",
            "duration": 30,
            "caloriesBurned": 250,
            "additionalMetrics": {},
            "createdAt": "2025-03-01T08:15:30"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let activity = Activity {
        activity_type: ActivityType::Running,
        duration: 30,
        calories_burned: 250,
        additional_metrics: Map::new(),
    };
    let record = client(&mock_server, signed_in_store())
        .create_activity(&activity)
        .await
        .unwrap();

    assert_eq!(record.id, "665f1c");
    assert_eq!(record.calories_burned, Some(250));
}

#[tokio::test]
async fn test_create_activity_surfaces_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Invalid User: u1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let activity = Activity {
        activity_type: ActivityType::Walking,
        duration: 10,
        calories_burned: 40,
        additional_metrics: Map::new(),
    };
    let err = client(&mock_server, signed_in_store())
        .create_activity(&activity)
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Invalid User: u1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_activity_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommendations/activity/42"))
        .and(header("x-user-id", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1",
            "activityId": "42",
            "userId": "u1",
            "type": "RUNNING",
            "recommendation": "Overall:Solid effort",
            "improvements": ["Pacing: start slower"],
            "suggestions": ["Tempo run: 20 minutes"],
            "safety": ["Always warm up before exercise"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let detail = client(&mock_server, signed_in_store())
        .get_activity_detail("42")
        .await
        .unwrap();

    assert_eq!(detail.activity_id.as_deref(), Some("42"));
    assert_eq!(detail.improvements, vec!["Pacing: start slower"]);
}

#[tokio::test]
async fn test_get_activity_detail_encodes_id_as_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recommendations/activity/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activityId": "a/b c",
            "recommendation": "Overall:Solid effort"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let detail = client(&mock_server, signed_in_store())
        .get_activity_detail("a/b c")
        .await
        .unwrap();
    assert_eq!(detail.activity_id.as_deref(), Some("a/b c"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/api/recommendations/activity/a%2Fb%20c");
}

#[tokio::test]
async fn test_get_activity_detail_rejects_empty_id_without_request() {
    let mock_server = MockServer::start().await;

    let err = client(&mock_server, signed_in_store())
        .get_activity_detail("")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::EmptyId));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, signed_in_store())
        .list_activities()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
