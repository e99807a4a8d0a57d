//! Common test utilities for integration tests
//!
//! Spins the full router up against a real database (DATABASE_URL, falling
//! back to the development default) and drives it through tower's `oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use moodlog_backend::{config::AppConfig, routes, state::AppState};
use sqlx::PgPool;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: PgPool,
}

impl TestApp {
    /// Create a new test application with a real database
    pub async fn new() -> Self {
        let config = test_config();
        let pool = PgPool::connect(&config.database.url)
            .await
            .expect("Failed to connect to test database");

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state);

        Self { app, pool }
    }

    /// Register a fresh user and log in, returning the bearer token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let body = format!(r#"{{"username":"{username}","password":"{password}"}}"#);

        let (status, _) = self.post("/register", &body, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "registration failed");

        let (status, response) = self.post("/login", &body, None).await;
        assert_eq!(status, StatusCode::OK, "login failed");

        let response: serde_json::Value = serde_json::from_str(&response).unwrap();
        response["token"].as_str().unwrap().to_string()
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, String) {
        self.request("GET", path, None, token).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str, token: Option<&str>) -> (StatusCode, String) {
        self.request("POST", path, Some(body), token).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch(&self, path: &str, body: &str, token: Option<&str>) -> (StatusCode, String) {
        self.request("PATCH", path, Some(body), token).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, String) {
        self.request("DELETE", path, None, token).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        token: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_default())
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(bytes.to_vec()).unwrap();

        (status, body_str)
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }
    config
}

/// A username no other test run will have seen
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}
