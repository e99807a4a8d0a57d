//! Integration tests for the mood resource

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn full_mood_body(date: &str) -> serde_json::Value {
    json!({
        "date": date,
        "humors": {"value": 8, "description": "good day", "health_based": false},
        "water_intakes": {"milliliters": 2000, "description": "bottles", "pee": true},
        "exercises": {"minutes": 30, "description": "walk"},
        "food_habits": {"value": 7, "description": "light meals"}
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mood_structured_create_and_fetch() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("mood_create"), "p1")
        .await;

    let date = "2015-05-05";
    let (status, _) = app
        .post("/mood", &full_mood_body(date).to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.get(&format!("/mood/date/{date}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let mood = response.as_object().unwrap().values().next().unwrap();

    assert_eq!(mood["date"], date);
    assert_eq!(mood["humors"][0]["value"], 8);
    assert_eq!(mood["water_intakes"][0]["milliliters"], 2000);
    assert_eq!(mood["exercises"][0]["minutes"], 30);
    assert_eq!(mood["food_habits"][0]["value"], 7);
    assert_eq!(mood["sleeps"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mood_create_requires_all_children() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("mood_partial"), "p1")
        .await;

    let body = json!({
        "humors": {"value": 8, "description": "ok", "health_based": false}
    });
    let (status, _) = app.post("/mood", &body.to_string(), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mood_groups_child_entries_posted_separately() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("mood_group"), "p1")
        .await;

    let date = "2016-06-06";
    let humor = json!({"date": date, "value": 6, "description": "ok", "health_based": true});
    app.post("/humor", &humor.to_string(), Some(&token)).await;
    let sleep = json!({"date": date, "value": 5, "minutes": 420, "description": "short"});
    app.post("/sleep", &sleep.to_string(), Some(&token)).await;

    // Both entries landed on the same auto-created mood
    let (status, response) = app.get(&format!("/mood/date/{date}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let moods = response.as_object().unwrap();
    assert_eq!(moods.len(), 1);

    let mood = moods.values().next().unwrap();
    assert_eq!(mood["humors"].as_array().unwrap().len(), 1);
    assert_eq!(mood["sleeps"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mood_foreign_record_forbidden() {
    let app = common::TestApp::new().await;
    let owner_token = app
        .register_and_login(&common::unique_username("mood_owner"), "p1")
        .await;
    let intruder_token = app
        .register_and_login(&common::unique_username("mood_intruder"), "p1")
        .await;

    let humor = json!({"date": "2017-07-07", "value": 6, "description": "ok", "health_based": false});
    app.post("/humor", &humor.to_string(), Some(&owner_token)).await;

    let (status, response) = app.get("/mood/date/2017-07-07", Some(&owner_token)).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let mood_id = response
        .as_object()
        .unwrap()
        .keys()
        .next()
        .unwrap()
        .parse::<i64>()
        .unwrap();

    let (status, _) = app
        .get(&format!("/mood/{mood_id}"), Some(&intruder_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mood_patch_fans_out_to_children() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("mood_patch"), "p1")
        .await;

    let date = "2018-08-08";
    app.post("/mood", &full_mood_body(date).to_string(), Some(&token))
        .await;

    let (_, response) = app.get(&format!("/mood/date/{date}"), Some(&token)).await;
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let mood_id = response
        .as_object()
        .unwrap()
        .keys()
        .next()
        .unwrap()
        .parse::<i64>()
        .unwrap();

    let patch = json!({"humors": {"value": 2}, "exercises": {"minutes": 90}});
    let (status, updated) = app
        .patch(&format!("/mood/{mood_id}"), &patch.to_string(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let updated: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(updated["humors"][0]["value"], 2);
    // Untouched humor fields survive the merge
    assert_eq!(updated["humors"][0]["description"], "good day");
    assert_eq!(updated["exercises"][0]["minutes"], 90);
    // Categories without a patch are untouched
    assert_eq!(updated["water_intakes"][0]["milliliters"], 2000);

    // Empty patch body is rejected
    let (status, _) = app
        .patch(&format!("/mood/{mood_id}"), "{}", Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mood_delete_cascades_to_children() {
    let app = common::TestApp::new().await;
    let token = app
        .register_and_login(&common::unique_username("mood_delete"), "p1")
        .await;

    let date = "2019-09-09";
    app.post("/mood", &full_mood_body(date).to_string(), Some(&token))
        .await;

    let (_, response) = app.get(&format!("/mood/date/{date}"), Some(&token)).await;
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    let mood = response.as_object().unwrap().values().next().unwrap();
    let mood_id = mood["id"].as_i64().unwrap();
    let humor_id = mood["humors"][0]["id"].as_i64().unwrap();

    let (status, _) = app.delete(&format!("/mood/{mood_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The children went with the mood
    let (status, _) = app.get(&format!("/humor/{humor_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
