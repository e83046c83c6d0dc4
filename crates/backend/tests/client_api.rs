//! Integration tests for `BackendClient` against an in-process mock backend.

mod common;

use assert_matches::assert_matches;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{client_for, spawn_backend, unreachable_client, Seen};
use mimamori_backend::BackendError;
use mimamori_core::hospital::Hospital;
use mimamori_core::pagination::UserListQuery;
use mimamori_core::settings::AlertSettings;
use mimamori_core::user::User;
use serde_json::{json, Value};

async fn record(State(seen): State<Seen>, RawQuery(query): RawQuery, body: String) {
    seen.lock()
        .unwrap()
        .push((query.unwrap_or_default(), body));
}

fn mock_backend(seen: Seen) -> Router {
    Router::new()
        .route(
            "/api/getUsers",
            get(|state: State<Seen>, query: RawQuery| async move {
                record(state, query, String::new()).await;
                Json(json!({
                    "success": true,
                    "users": [
                        { "userId": "u1", "name": "山田 太郎", "hospitalName": "中央病院" },
                        { "userId": "u2", "name": "佐藤 花子" }
                    ],
                    "pagination": { "page": 2, "limit": 2, "total": 6, "totalPages": 3 }
                }))
            }),
        )
        .route(
            "/api/getUser",
            get(|RawQuery(query): RawQuery| async move {
                if query.as_deref() == Some("userId=u1") {
                    let user = json!({ "userId": "u1", "name": "山田 太郎" });
                    (StatusCode::OK, Json(json!({ "success": true, "data": user })))
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "success": false, "message": "User not found" })),
                    )
                }
            }),
        )
        .route(
            "/api/createUser",
            post(|state: State<Seen>, query: RawQuery, body: String| async move {
                record(state, query, body).await;
                Json(json!({ "success": true, "message": "登録しました" }))
            }),
        )
        .route(
            "/api/updateUser",
            post(|| async {
                Json(json!({ "success": false, "message": "利用者が存在しません" }))
            }),
        )
        .route(
            "/api/getHospitals",
            get(|| async {
                Json(json!({
                    "success": true,
                    "hospitals": [
                        { "hospitalId": "h1", "name": "中央病院", "phone": "03-1234-5678" }
                    ]
                }))
            }),
        )
        .route(
            "/api/deleteHospital",
            post(|| async { "<html>maintenance</html>" }),
        )
        .route(
            "/api/getSettings",
            get(|RawQuery(query): RawQuery| async move {
                if query.as_deref() == Some("userId=fresh") {
                    Json(json!({ "success": true }))
                } else {
                    Json(json!({ "success": true, "data": { "heartRateMax": 140 } }))
                }
            }),
        )
        .route(
            "/api/updateSettings",
            post(|state: State<Seen>, query: RawQuery, body: String| async move {
                record(state, query, body).await;
                Json(json!({ "success": true }))
            }),
        )
        .route(
            "/api/echo",
            post(|body: String| async move {
                (
                    StatusCode::ACCEPTED,
                    [("content-type", "application/json")],
                    body,
                )
            }),
        )
        .with_state(seen)
}

async fn setup() -> (mimamori_backend::BackendClient, Seen) {
    let seen = Seen::default();
    let addr = spawn_backend(mock_backend(seen.clone())).await;
    (client_for(addr), seen)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_users_sends_filters_and_reads_pagination() {
    let (client, seen) = setup().await;
    let query = UserListQuery {
        page: Some(2),
        limit: Some(2),
        search: Some("山田".into()),
        hospital_id: None,
    };

    let page = client.list_users(&query).await.unwrap();

    assert_eq!(page.users.len(), 2);
    assert_eq!(page.users[0].hospital_name.as_deref(), Some("中央病院"));
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next());

    let recorded = seen.lock().unwrap();
    let (q, _) = &recorded[0];
    assert!(q.contains("page=2"), "query was {q}");
    assert!(q.contains("limit=2"), "query was {q}");
    assert!(q.contains("search="), "query was {q}");
    assert!(!q.contains("hospitalId"), "query was {q}");
}

#[tokio::test]
async fn get_user_not_found_keeps_backend_message() {
    let (client, _) = setup().await;

    let user = client.get_user("u1").await.unwrap();
    assert_eq!(user.name, "山田 太郎");

    let err = client.get_user("nobody").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.backend_message(), Some("User not found"));
}

#[tokio::test]
async fn create_user_posts_camel_case_json() {
    let (client, seen) = setup().await;
    let user = User {
        user_id: "u9".into(),
        name: "鈴木 一郎".into(),
        height_cm: Some(170.0),
        ..Default::default()
    };

    let message = client.create_user(&user).await.unwrap();
    assert_eq!(message.as_deref(), Some("登録しました"));

    let recorded = seen.lock().unwrap();
    let body: Value = serde_json::from_str(&recorded[0].1).unwrap();
    assert_eq!(body["userId"], "u9");
    assert_eq!(body["heightCm"], 170.0);
}

#[tokio::test]
async fn success_false_is_rejected() {
    let (client, _) = setup().await;
    let err = client.update_user(&User::default()).await.unwrap_err();
    assert_matches!(err, BackendError::Rejected { message } if message == "利用者が存在しません");
}

// ---------------------------------------------------------------------------
// Facilities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_hospitals_reads_hospitals_key() {
    let (client, _) = setup().await;
    let hospitals: Vec<Hospital> = client.list_hospitals().await.unwrap();
    assert_eq!(hospitals[0].hospital_id, "h1");
    assert_eq!(hospitals[0].phone.as_deref(), Some("03-1234-5678"));
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
    let (client, _) = setup().await;
    let err = client.delete_hospital("h1").await.unwrap_err();
    assert_matches!(err, BackendError::Malformed(_));
}

#[tokio::test]
async fn missing_route_is_status_error() {
    let (client, _) = setup().await;
    let err = client.delete_user("u1").await.unwrap_err();
    assert_matches!(err, BackendError::Status { status: 404, .. });
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_settings_fills_defaults_or_reports_absent() {
    let (client, _) = setup().await;

    let stored = client.get_settings("u1").await.unwrap().unwrap();
    assert_eq!(stored.heart_rate_max, 140);
    assert_eq!(stored.heart_rate_min, AlertSettings::default().heart_rate_min);

    assert_eq!(client.get_settings("fresh").await.unwrap(), None);
}

#[tokio::test]
async fn update_settings_flattens_user_id_and_thresholds() {
    let (client, seen) = setup().await;
    let settings = AlertSettings {
        steps_enabled: true,
        ..Default::default()
    };

    client.update_settings("u1", &settings).await.unwrap();

    let recorded = seen.lock().unwrap();
    let body: Value = serde_json::from_str(&recorded[0].1).unwrap();
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["stepsEnabled"], true);
    assert_eq!(body["heartRateMin"], 50);
}

// ---------------------------------------------------------------------------
// Raw forwarding and transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forward_relays_status_type_and_body() {
    let (client, _) = setup().await;
    let forwarded = client
        .forward(
            reqwest::Method::POST,
            "/api/echo?x=1",
            Some("application/json"),
            br#"{"a":1}"#.to_vec(),
        )
        .await
        .unwrap();

    assert_eq!(forwarded.status, 202);
    assert_eq!(forwarded.content_type.as_deref(), Some("application/json"));
    assert_eq!(forwarded.body, br#"{"a":1}"#);
}

#[tokio::test]
async fn unreachable_backend_is_request_error() {
    let client = unreachable_client().await;
    let err = client.list_hospitals().await.unwrap_err();
    assert_matches!(err, BackendError::Request(_));
    assert!(!client.ping().await);
}
