//! Login and registration routes

use crate::auth::PasswordService;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::UnitOfWork;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use moodlog_shared::types::{LoginRequest, RegisterRequest, TokenResponse};
use moodlog_shared::validation::{validate_password, validate_username};
use tracing::info;

/// POST /login - Exchange credentials for a bearer token
///
/// The issued token is also persisted on the credential row; later requests
/// rotate it through the auth middleware.
pub async fn login(
    State(state): State<AppState>,
    BodyJson(req): BodyJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let user_auth = uow
        .repository()
        .get_user_auth_by_username(&req.username)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No User data with username {}.", req.username))
        })?;

    let valid = PasswordService::verify_async(req.password, user_auth.password_hash.clone()).await?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials.".to_string()));
    }

    let token = state.jwt().generate_token(&user_auth.username)?;
    uow.repository().record_login(user_auth.id, &token).await?;
    uow.commit().await?;

    info!(username = %user_auth.username, "User logged in");
    Ok(Json(TokenResponse { token }))
}

/// POST /register - Create a user and its credentials
///
/// Usernames are unique; a second registration with the same name is a 403.
pub async fn register(
    State(state): State<AppState>,
    BodyJson(req): BodyJson<RegisterRequest>,
) -> ApiResult<StatusCode> {
    validate_username(&req.username).map_err(ApiError::Validation)?;
    validate_password(&req.password).map_err(ApiError::Validation)?;

    let password_hash = PasswordService::hash_async(req.password).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    match uow
        .repository()
        .create_user_with_auth(&req.username, &password_hash)
        .await
    {
        Ok(_) => {
            uow.commit().await?;
            info!(username = %req.username, "User registered");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) if is_unique_violation(&e) => Err(ApiError::Forbidden(format!(
            "Username {} is already taken.",
            req.username
        ))),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
