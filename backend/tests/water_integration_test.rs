//! Integration tests for the water intake resource

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_water_round_trip() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("water_rt"), "p1")
        .await;

    let (status, _) = app.get("/water-intake/date/2012-12-21", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({
        "date": "2012-12-21",
        "milliliters": 500,
        "description": "morning bottle",
        "pee": true
    });
    let (status, created) = app
        .post("/water-intake", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let (status, response) = app.get("/water-intake/date/2012-12-21", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let entry = &response[id.to_string()];
    assert_eq!(entry["milliliters"], 500);
    assert_eq!(entry["description"], "morning bottle");
    assert_eq!(entry["pee"], true);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_water_post_requires_all_keys() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("water_missing"), "p1")
        .await;

    // `pee` missing
    let body = json!({"milliliters": 500, "description": "bottle"});
    let (status, _) = app
        .post("/water-intake", &body.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_water_patch_merge_and_allow_list() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("water_patch"), "p1")
        .await;

    let body = json!({"milliliters": 300, "description": "glass", "pee": false});
    let (_, created) = app
        .post("/water-intake", &body.to_string(), Some(&token))
        .await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let patch = json!({"milliliters": 650});
    let (status, updated) = app
        .patch(&format!("/water-intake/{id}"), &patch.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let updated: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(updated["milliliters"], 650);
    assert_eq!(updated["description"], "glass");

    // `date` is not patchable
    let (status, _) = app
        .patch(
            &format!("/water-intake/{id}"),
            r#"{"date":"2020-01-01"}"#,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
