//! Integration tests for the sleep resource

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_sleep_round_trip() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("sleep_rt"), "p1")
        .await;

    let (status, _) = app.get("/sleep/date/2012-12-21", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({
        "date": "2012-12-21",
        "value": 7,
        "minutes": 480,
        "description": "slept through"
    });
    let (status, created) = app.post("/sleep", &body.to_string(), Some(&token)).await;
    assert_eq!(status, StatusCode::CREATED);

    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let (status, response) = app.get("/sleep/date/2012-12-21", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let entry = &response[id.to_string()];
    assert_eq!(entry["value"], 7);
    assert_eq!(entry["minutes"], 480);
    assert_eq!(entry["description"], "slept through");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sleep_post_requires_all_keys() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("sleep_missing"), "p1")
        .await;

    // `minutes` missing
    let body = json!({"value": 7, "description": "nap"});
    let (status, _) = app.post("/sleep", &body.to_string(), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sleep_patch_merges_fields() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("sleep_patch"), "p1")
        .await;

    let body = json!({"value": 7, "minutes": 480, "description": "full night"});
    let (_, created) = app.post("/sleep", &body.to_string(), Some(&token)).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let patch = json!({"minutes": 510});
    let (status, updated) = app
        .patch(&format!("/sleep/{id}"), &patch.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let updated: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(updated["minutes"], 510);
    assert_eq!(updated["value"], 7);
    assert_eq!(updated["description"], "full night");
}
