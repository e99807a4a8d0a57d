//! Route definitions for the Moodlog API
//!
//! Login, register and health are public; every other route group sits
//! behind the bearer-token middleware.

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiError;
use crate::repositories::{MoodRecord, UnitOfWork};
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::debug;

mod auth;
mod exercises;
mod food;
mod health;
mod humor;
mod mood;
mod sleep;
mod water;

#[cfg(test)]
mod auth_tests;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/humor", humor::humor_routes())
        .nest("/water-intake", water::water_routes())
        .nest("/exercises", exercises::exercises_routes())
        .nest("/food", food::food_routes())
        .nest("/sleep", sleep::sleep_routes())
        .nest("/mood", mood::mood_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .merge(protected)
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Today's date in the server's local timezone, the default for new entries
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The single ownership rule of the API: a record may only be read or
/// mutated by the user owning its mood. Existence is checked before this
/// runs, so a mismatch is always a 403, never a 404.
pub(crate) fn authorize(auth: &AuthUser, owner_id: i64, resource: &str, id: i64) -> Result<(), ApiError> {
    if auth.user_id != owner_id {
        debug!(username = %auth.username, resource, id, "Ownership check failed");
        return Err(ApiError::Forbidden(format!(
            "Invalid user for {resource} {id}."
        )));
    }
    Ok(())
}

/// Fetch the caller's mood for a date, creating it on first use.
///
/// Runs in its own transaction and commits immediately: the mood must stay
/// in place even when a follow-up entry insert fails.
pub(crate) async fn resolve_mood_for_date(
    state: &AppState,
    user_id: i64,
    date: NaiveDate,
) -> Result<MoodRecord, ApiError> {
    let mut uow = UnitOfWork::begin(state.db()).await?;

    if let Some(mood) = uow
        .repository()
        .get_mood_by_user_and_date(user_id, date)
        .await?
    {
        uow.commit().await?;
        return Ok(mood);
    }

    let mood = uow.repository().add_mood(user_id, date).await?;
    uow.commit().await?;

    debug!(user_id, %date, mood_id = mood.id, "Mood auto-created");
    Ok(mood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, true)]
    #[case(1, 2, false)]
    #[case(42, 41, false)]
    fn test_authorize_matches_owner_only(
        #[case] user_id: i64,
        #[case] owner_id: i64,
        #[case] ok: bool,
    ) {
        let auth = AuthUser {
            user_id,
            username: "u1".to_string(),
        };
        assert_eq!(authorize(&auth, owner_id, "humor", 7).is_ok(), ok);
    }

    #[test]
    fn test_authorize_names_the_resource() {
        let auth = AuthUser {
            user_id: 1,
            username: "u1".to_string(),
        };
        let err = authorize(&auth, 2, "water intake", 9).unwrap_err();
        assert!(err.to_string().contains("water intake 9"));
    }
}
