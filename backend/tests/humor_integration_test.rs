//! Integration tests for the humor resource
//!
//! Covers the full scenario from the API's contract: register, login,
//! GET-by-date 404 before any data, POST 201, GET-by-date 200 with the
//! posted fields, plus the ownership and allow-list failure paths.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_round_trip() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_rt"), "p1")
        .await;

    // Nothing tracked yet on this date
    let (status, _) = app.get("/humor/date/2012-12-21", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({
        "date": "2012-12-21",
        "value": 10,
        "description": "smiling in the park",
        "health_based": false
    });
    let (status, created) = app.post("/humor", &body.to_string(), Some(&token)).await;
    assert_eq!(status, StatusCode::CREATED);

    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    // Retrievable by date with the posted fields
    let (status, response) = app.get("/humor/date/2012-12-21", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let entry = &response[id.to_string()];
    assert_eq!(entry["value"], 10);
    assert_eq!(entry["description"], "smiling in the park");
    assert_eq!(entry["health_based"], false);

    // And by id
    let (status, _) = app.get(&format!("/humor/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_post_missing_key_rejected() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_missing"), "p1")
        .await;

    let body = json!({"date": "2012-12-21", "value": 10});
    let (status, _) = app.post("/humor", &body.to_string(), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_post_extra_key_rejected() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_extra"), "p1")
        .await;

    let body = json!({
        "value": 10,
        "description": "smiling in the park",
        "health_based": false,
        "extra": "this should break"
    });
    let (status, _) = app.post("/humor", &body.to_string(), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was persisted for the date
    let (status, _) = app.get("/humor/date/1111-11-11", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_get_unknown_id_not_found() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_404"), "p1")
        .await;

    let (status, _) = app.get("/humor/999999999", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_get_malformed_date_rejected() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_baddate"), "p1")
        .await;

    let (status, _) = app.get("/humor/date/11-11-1111", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_foreign_record_forbidden() {
    let app = common::TestApp::new().await;
    let owner_token = app
        .register_and_login(&common::unique_username("humor_owner"), "p1")
        .await;
    let intruder_token = app
        .register_and_login(&common::unique_username("humor_intruder"), "p1")
        .await;

    let body = json!({"value": 5, "description": "mine", "health_based": false});
    let (status, created) = app
        .post("/humor", &body.to_string(), Some(&owner_token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    // Existence is confirmed before ownership: 403, never 404.
    let (status, _) = app.get(&format!("/humor/{id}"), Some(&intruder_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let patch = json!({"value": 1});
    let (status, _) = app
        .patch(&format!("/humor/{id}"), &patch.to_string(), Some(&intruder_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .delete(&format!("/humor/{id}"), Some(&intruder_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_patch_merges_fields() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_patch"), "p1")
        .await;

    let body = json!({"value": 5, "description": "before", "health_based": false});
    let (_, created) = app.post("/humor", &body.to_string(), Some(&token)).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let patch = json!({"value": 9});
    let (status, updated) = app
        .patch(&format!("/humor/{id}"), &patch.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Patched field changed, the rest survived the merge
    let updated: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(updated["value"], 9);
    assert_eq!(updated["description"], "before");
    assert_eq!(updated["health_based"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_patch_empty_body_rejected() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_empty"), "p1")
        .await;

    let body = json!({"value": 5, "description": "x", "health_based": false});
    let (_, created) = app.post("/humor", &body.to_string(), Some(&token)).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let (status, _) = app
        .patch(&format!("/humor/{id}"), "{}", Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // `date` sits outside the patch allow-list
    let (status, _) = app
        .patch(
            &format!("/humor/{id}"),
            r#"{"date":"2012-12-21"}"#,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_delete_is_not_repeatable() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("humor_delete"), "p1")
        .await;

    let body = json!({"value": 5, "description": "x", "health_based": false});
    let (_, created) = app.post("/humor", &body.to_string(), Some(&token)).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let (status, _) = app.delete(&format!("/humor/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Second delete finds nothing
    let (status, _) = app.delete(&format!("/humor/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_humor_delete_by_date_stops_at_foreign_rows() {
    let app = common::TestApp::new().await;
    let owner_token = app
        .register_and_login(&common::unique_username("humor_bulk_owner"), "p1")
        .await;
    let other_token = app
        .register_and_login(&common::unique_username("humor_bulk_other"), "p1")
        .await;

    let date = "2013-03-03";
    let body = json!({"date": date, "value": 5, "description": "x", "health_based": false});
    app.post("/humor", &body.to_string(), Some(&owner_token)).await;
    let (_, created) = app.post("/humor", &body.to_string(), Some(&other_token)).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let other_id = created["id"].as_i64().unwrap();

    // The date holds a foreign row, so the bulk delete must refuse...
    let (status, _) = app
        .delete(&format!("/humor/date/{date}"), Some(&owner_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // ...and roll back: the other user's row is still there.
    let (status, _) = app
        .get(&format!("/humor/{other_id}"), Some(&other_token))
        .await;
    assert_eq!(status, StatusCode::OK);
}
