#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;

use mimamori_backend::BackendClient;
use mimamori_web::config::ServerConfig;
use mimamori_web::router::build_app_router;
use mimamori_web::state::AppState;

/// Requests seen by the mock backend: `(path_and_query, body)`.
pub type Seen = Arc<Mutex<Vec<(String, String)>>>;

/// A mock backend running on an ephemeral port.
pub struct TestBackend {
    pub addr: SocketAddr,
    pub seen: Seen,
}

impl TestBackend {
    /// Body of the first recorded request whose path starts with `path`.
    pub fn body_for(&self, path: &str) -> Option<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.starts_with(path))
            .map(|(_, body)| body.clone())
    }

    pub fn path_for(&self, path: &str) -> Option<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p.starts_with(path))
            .map(|(p, _)| p.clone())
    }

    pub fn called(&self, path: &str) -> bool {
        self.path_for(path).is_some()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdQuery {
    user_id: String,
}

fn record(seen: &Seen, uri: &Uri, body: String) {
    seen.lock().unwrap().push((uri.to_string(), body));
}

fn user_json(user_id: &str) -> Option<Value> {
    match user_id {
        "u1" => Some(json!({
            "userId": "u1",
            "name": "山田 太郎",
            "nameKana": "ヤマダ タロウ",
            "gender": "male",
            "hospitalId": "h1",
            "hospitalName": "中央病院"
        })),
        "u2" => Some(json!({ "userId": "u2", "name": "佐藤 花子" })),
        "t.sato" => Some(json!({ "userId": "t.sato", "name": "佐藤 保" })),
        _ => None,
    }
}

fn user_response(user_id: &str) -> Response {
    match user_json(user_id) {
        Some(user) => Json(json!({ "success": true, "data": user })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "利用者が見つかりません" })),
        )
            .into_response(),
    }
}

fn settings_response(user_id: &str) -> Response {
    match user_id {
        "u1" => Json(json!({
            "success": true,
            "data": { "heartRateEnabled": true, "heartRateMin": 55, "heartRateMax": 110 }
        }))
        .into_response(),
        "u2" => Json(json!({ "success": true })).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "利用者が見つかりません" })),
        )
            .into_response(),
    }
}

fn ok() -> Response {
    Json(json!({ "success": true, "message": "OK" })).into_response()
}

/// The backend API as the front end expects it.
///
/// * `getUser`: knows `u1`, `u2` and `t.sato`, 404 with a message otherwise.
/// * `getSettings`: stored thresholds for `u1`, none for `u2`, 404 otherwise.
/// * `createUser`: rejects the id `dup` with `success: false`.
/// * `deleteUser`: answers 500 for the id `locked`.
fn mock_router(seen: Seen) -> Router {
    Router::new()
        .route(
            "/api/getUsers",
            routing::get(|State(seen): State<Seen>, uri: Uri| async move {
                record(&seen, &uri, String::new());
                Json(json!({
                    "success": true,
                    "users": [user_json("u1"), user_json("u2")],
                    "pagination": { "page": 1, "limit": 20, "total": 2, "totalPages": 1 }
                }))
            }),
        )
        .route(
            "/api/getUser",
            routing::get(
                |State(seen): State<Seen>, uri: Uri, Query(q): Query<UserIdQuery>| async move {
                    record(&seen, &uri, String::new());
                    user_response(&q.user_id)
                },
            ),
        )
        .route(
            "/api/createUser",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                let duplicate = body.contains(r#""userId":"dup""#);
                record(&seen, &uri, body);
                if duplicate {
                    Json(json!({ "success": false, "message": "利用者IDは既に使用されています" }))
                        .into_response()
                } else {
                    ok()
                }
            }),
        )
        .route(
            "/api/updateUser",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                record(&seen, &uri, body);
                ok()
            }),
        )
        .route(
            "/api/deleteUser",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                let locked = body.contains(r#""userId":"locked""#);
                record(&seen, &uri, body);
                if locked {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "success": false, "message": "削除できません" })),
                    )
                        .into_response()
                } else {
                    ok()
                }
            }),
        )
        .route(
            "/api/getHospitals",
            routing::get(|| async {
                Json(json!({
                    "success": true,
                    "hospitals": [
                        { "hospitalId": "h1", "name": "中央病院", "phone": "03-1234-5678" },
                        { "hospitalId": "h2", "name": "北クリニック" }
                    ]
                }))
            }),
        )
        .route(
            "/api/createHospital",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                record(&seen, &uri, body);
                ok()
            }),
        )
        .route(
            "/api/updateHospital",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                record(&seen, &uri, body);
                ok()
            }),
        )
        .route(
            "/api/deleteHospital",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                record(&seen, &uri, body);
                ok()
            }),
        )
        .route(
            "/api/getSettings",
            routing::get(
                |State(seen): State<Seen>, uri: Uri, Query(q): Query<UserIdQuery>| async move {
                    record(&seen, &uri, String::new());
                    settings_response(&q.user_id)
                },
            ),
        )
        .route(
            "/api/updateSettings",
            routing::post(|State(seen): State<Seen>, uri: Uri, body: String| async move {
                record(&seen, &uri, body);
                ok()
            }),
        )
        .with_state(seen)
}

/// Serve the mock backend on an ephemeral localhost port.
pub async fn start_backend() -> TestBackend {
    let seen = Seen::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = mock_router(Arc::clone(&seen));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    TestBackend { addr, seen }
}

/// An address nothing listens on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Build a test `ServerConfig` pointing at `backend`.
///
/// Uses `http://localhost:5173` as the only CORS origin.
pub fn test_config(backend: SocketAddr) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend_base_url: format!("http://{backend}"),
        backend_timeout_secs: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        users_page_size: 20,
    }
}

/// Build the full application router with all middleware layers, talking to
/// the backend at `backend`.
pub fn build_test_app(backend: SocketAddr) -> Router {
    let config = test_config(backend);
    let client = BackendClient::new(
        &config.backend_base_url,
        Duration::from_secs(config.backend_timeout_secs),
    )
    .unwrap();

    let state = AppState {
        backend: Arc::new(client),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
