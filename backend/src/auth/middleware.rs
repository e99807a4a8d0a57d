//! Authentication middleware
//!
//! Validates the bearer token on every request reaching a protected route,
//! resolves the embedded username against `user_auth`, and attaches the
//! resulting [`AuthUser`] to the request for ownership checks downstream.
//!
//! On every authenticated success response a fresh token is minted,
//! persisted onto the `user_auth` row in a single commit, and returned to
//! the client in the `X-Auth-Token` header. Clients must always present the
//! most recently returned token.

use crate::error::ApiError;
use crate::repositories::UnitOfWork;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Name of the response header carrying the rotated bearer token
pub const REFRESHED_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header.".to_string()))
    }
}

/// Middleware guarding all routes except login/register/health
///
/// Apply via `middleware::from_fn_with_state` on the protected route group;
/// the public group simply never passes through here.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&request)?;

    let claims = state
        .jwt()
        .validate_token(token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let user_auth = uow
        .repository()
        .get_user_auth_by_username(&claims.sub)
        .await?;
    uow.commit().await?;

    let user_auth = user_auth
        .filter(|auth| auth.active)
        .ok_or_else(|| ApiError::Unauthorized("Invalid user.".to_string()))?;

    debug!(username = %user_auth.username, "Request authenticated");
    request.extensions_mut().insert(AuthUser {
        user_id: user_auth.user_id,
        username: user_auth.username.clone(),
    });

    let mut response = next.run(request).await;

    // Rotate the token only when the handler succeeded; rejected requests
    // keep the credential they came with.
    if response.status().is_success() {
        let fresh = rotate_token(&state, &user_auth.username).await?;
        let value = HeaderValue::from_str(&fresh)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Generated token not header-safe: {e}")))?;
        response.headers_mut().insert(REFRESHED_TOKEN_HEADER, value);
    }

    Ok(response)
}

/// Mint a fresh token for `username` and persist it in a single commit
async fn rotate_token(state: &AppState, username: &str) -> Result<String, ApiError> {
    let fresh = state.jwt().generate_token(username)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    uow.repository().store_token(username, &fresh).await?;
    uow.commit().await?;

    debug!(username = %username, "Bearer token rotated");
    Ok(fresh)
}

/// Pull the token out of the `Authorization` header
///
/// The header must hold exactly two whitespace-separated parts (scheme and
/// token); anything else is a 401.
fn extract_bearer_token(request: &Request<Body>) -> Result<&str, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header.".to_string()))?;

    let mut parts = auth_header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) => Ok(token),
        _ => Err(ApiError::Unauthorized(
            "Invalid authorization header.".to_string(),
        )),
    }
}
