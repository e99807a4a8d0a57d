//! Request body extraction
//!
//! Axum's stock `Json` extractor answers malformed bodies with 422; this
//! API treats every body problem (bad JSON, missing key, unknown key) as a
//! plain 400 with a descriptive message.

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

/// JSON body whose deserialization failures become 400 responses
pub struct BodyJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for BodyJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(BodyJson(value))
    }
}
