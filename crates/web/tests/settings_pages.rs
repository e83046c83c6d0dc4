//! Integration tests for the alert settings page against the mock backend.

mod common;

use axum::http::StatusCode;
use common::{body_text, get, location, post_form};

const VALID_FORM: &str = "heartRateEnabled=on&heartRateMin=60&heartRateMax=110\
&skinTempEnabled=on&skinTempMin=35.5&skinTempMax=37.5\
&stepsMin=2000\
&sleepEnabled=on&sleepMinHours=5&sleepMaxHours=10\
&noDataEnabled=on&noDataMinutes=30";

#[tokio::test]
async fn stored_settings_prefill_the_form() {
    let backend = common::start_backend().await;
    let response = get(common::build_test_app(backend.addr), "/users/u1/settings").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("山田 太郎 さんのアラート設定"));
    assert!(html.contains(r#"name="heartRateMin" value="55""#));
    assert!(html.contains(r#"name="heartRateMax" value="110""#));
    assert!(!html.contains("初期値を表示しています"));
}

#[tokio::test]
async fn missing_settings_fall_back_to_defaults() {
    let backend = common::start_backend().await;
    let response = get(common::build_test_app(backend.addr), "/users/u2/settings").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("初期値を表示しています"));
    assert!(html.contains(r#"name="heartRateMin" value="50""#));
    assert!(html.contains(r#"name="noDataMinutes" value="60""#));
}

#[tokio::test]
async fn settings_for_unknown_user_is_404() {
    let backend = common::start_backend().await;
    let response = get(common::build_test_app(backend.addr), "/users/ghost/settings").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_posts_flattened_settings_and_redirects() {
    let backend = common::start_backend().await;
    let response = post_form(
        common::build_test_app(backend.addr),
        "/users/u1/settings",
        VALID_FORM,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users/u1/settings?notice=settings_saved");

    let body: serde_json::Value =
        serde_json::from_str(&backend.body_for("/api/updateSettings").unwrap()).unwrap();
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["heartRateMin"], 60);
    assert_eq!(body["skinTempMax"], 37.5);
    assert_eq!(body["stepsEnabled"], false);
    assert_eq!(body["noDataMinutes"], 30);
}

#[tokio::test]
async fn inverted_bounds_are_rejected_locally() {
    let backend = common::start_backend().await;
    let form = VALID_FORM.replace("heartRateMin=60", "heartRateMin=130");
    let app = common::build_test_app(backend.addr);
    let response = post_form(app, "/users/u1/settings", &form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("入力内容を確認してください"));
    assert!(html.contains("心拍数の下限は上限より小さくしてください"));
    assert!(html.contains("山田 太郎 さんのアラート設定"));
    assert!(html.contains(r#"name="heartRateMin" value="130""#));
    assert!(!backend.called("/api/updateSettings"));
}

#[tokio::test]
async fn blank_bound_is_required() {
    let backend = common::start_backend().await;
    let form = VALID_FORM.replace("stepsMin=2000", "stepsMin=");
    let app = common::build_test_app(backend.addr);
    let response = post_form(app, "/users/u1/settings", &form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("歩数下限は必須です"));
}

#[tokio::test]
async fn non_finite_temperature_never_reaches_backend() {
    let backend = common::start_backend().await;
    let form = VALID_FORM.replace("skinTempMin=35.5", "skinTempMin=NaN");
    let app = common::build_test_app(backend.addr);
    let response = post_form(app, "/users/u1/settings", &form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("皮膚温下限には数値を入力してください"));
    assert!(!backend.called("/api/updateSettings"));
}
