//! API integration tests.
//!
//! These tests run full requests through the router against a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use cinecircle_api::{AppState, router as api_router};
use cinecircle_common::sign_webhook;
use cinecircle_core::{ActivityService, FriendshipService, IdentityService, WatchlistService};
use cinecircle_db::entities::{friend_request, user, user::FriendIds, watchlist_item};
use cinecircle_db::repositories::{
    ActivityRepository, FriendRequestRepository, UserRepository, WatchlistRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use std::sync::Arc;
use tower::ServiceExt;

const WEBHOOK_SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

/// Build an app over the given mock connection.
fn create_test_app(db: DatabaseConnection, webhook_secret: Option<&str>) -> Router {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let request_repo = FriendRequestRepository::new(Arc::clone(&db));
    let activity_repo = ActivityRepository::new(Arc::clone(&db));
    let watchlist_repo = WatchlistRepository::new(Arc::clone(&db));

    let state = AppState {
        friendship_service: FriendshipService::new(
            Arc::clone(&db),
            request_repo,
            user_repo.clone(),
        ),
        identity_service: IdentityService::new(user_repo.clone()),
        activity_service: ActivityService::new(activity_repo.clone(), user_repo),
        watchlist_service: WatchlistService::new(watchlist_repo, activity_repo),
        webhook_secret: webhook_secret.map(ToString::to_string),
        webhook_tolerance_secs: 300,
    };

    api_router().with_state(state)
}

fn create_test_user(external_id: &str) -> user::Model {
    user::Model {
        id: format!("id_{external_id}"),
        external_id: external_id.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: format!("{external_id}@example.com"),
        profile_picture: String::new(),
        friends: FriendIds::default(),
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_send_friend_request_to_self_is_rejected() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        None,
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/friend-requests/send",
            serde_json::json!({"senderId": "u1", "receiverId": "u1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_friend_request_returns_created() {
    let sender = create_test_user("u1");
    let receiver = create_test_user("u2");
    let created = friend_request::Model {
        id: "r1".to_string(),
        sender_id: "u1".to_string(),
        receiver_id: "u2".to_string(),
        pair_key: friend_request::pair_key("u1", "u2"),
        status: friend_request::RequestStatus::Pending,
        created_at: Utc::now().into(),
        updated_at: None,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sender], vec![receiver]])
        .append_query_results([Vec::<friend_request::Model>::new()])
        .append_query_results([vec![created]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let app = create_test_app(db, None);
    let response = app
        .oneshot(json_request(
            "POST",
            "/friend-requests/send",
            serde_json::json!({"senderId": "u1", "receiverId": "u2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["senderId"], "u1");
}

#[tokio::test]
async fn test_send_friend_request_with_missing_field_returns_bad_request() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        None,
    );

    // No senderId at all; must read as 400, same as an empty one
    let response = app
        .oneshot(json_request(
            "POST",
            "/friend-requests/send",
            serde_json::json!({"receiverId": "u2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sync_with_missing_clerk_id_returns_bad_request() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        None,
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/users/sync",
            serde_json::json!({"firstName": "Test"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_accept_unknown_request_returns_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<friend_request::Model>::new()])
        .into_connection();

    let app = create_test_app(db, None);
    let response = app
        .oneshot(json_request(
            "POST",
            "/friend-requests/accept",
            serde_json::json!({"requestId": "missing"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sync_new_user_returns_created() {
    let created = create_test_user("clerk_u1");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .append_query_results([vec![created]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let app = create_test_app(db, None);
    let response = app
        .oneshot(json_request(
            "POST",
            "/users/sync",
            serde_json::json!({
                "clerkId": "clerk_u1",
                "firstName": "Test",
                "lastName": "User",
                "email": "clerk_u1@example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["data"]["clerkId"], "clerk_u1");
}

#[tokio::test]
async fn test_webhook_without_configured_secret_fails() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        None,
    );

    let response = app
        .oneshot(json_request("POST", "/webhooks", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_webhook_with_bad_signature_is_rejected() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        Some(WEBHOOK_SECRET),
    );

    let ts = Utc::now().timestamp();
    let request = Request::builder()
        .method("POST")
        .uri("/webhooks")
        .header(header::CONTENT_TYPE, "application/json")
        .header("webhook-id", "msg_1")
        .header("webhook-timestamp", ts.to_string())
        .header("webhook-signature", "v1,AAAA")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_user_created_syncs_user() {
    let created = create_test_user("clerk_u1");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .append_query_results([vec![created]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let app = create_test_app(db, Some(WEBHOOK_SECRET));

    let body = serde_json::json!({
        "type": "user.created",
        "data": {
            "id": "clerk_u1",
            "first_name": "Test",
            "last_name": "User",
            "email_addresses": [{"email_address": "clerk_u1@example.com"}]
        }
    })
    .to_string();

    let ts = Utc::now().timestamp();
    let signature = sign_webhook(WEBHOOK_SECRET, "msg_1", ts, body.as_bytes()).unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/webhooks")
        .header(header::CONTENT_TYPE, "application/json")
        .header("svix-id", "msg_1")
        .header("svix-timestamp", ts.to_string())
        .header("svix-signature", signature)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"]["success"], true);
}

#[tokio::test]
async fn test_get_watchlist() {
    let item = watchlist_item::Model {
        id: "w1".to_string(),
        user_id: "u1".to_string(),
        movie_id: "603".to_string(),
        title: "The Matrix".to_string(),
        poster_path: None,
        release_date: Some("1999-03-31".to_string()),
        added_at: Utc::now().into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![item]])
        .into_connection();

    let app = create_test_app(db, None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/watchlist/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"][0]["movieId"], "603");
}

#[tokio::test]
async fn test_activity_feed_for_unknown_user_returns_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let app = create_test_app(db, None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/activities/feed/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
