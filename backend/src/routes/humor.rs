//! Humor tracking routes
//!
//! `GET /humor/{id}`            fetch one entry
//! `GET /humor/date/{date}`     fetch a date's entries, keyed by id
//! `POST /humor`                add an entry (mood auto-created)
//! `PATCH /humor/{id}`          merge-update an entry
//! `DELETE /humor/{id}`         delete one entry
//! `DELETE /humor/date/{date}`  delete a date's entries

use super::{authorize, resolve_mood_for_date, today};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::{HumorPatch, HumorRecord, NewHumor, UnitOfWork};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moodlog_shared::types::{CreateHumorRequest, HumorResponse, UpdateHumorRequest};
use moodlog_shared::validation::parse_date;
use std::collections::BTreeMap;

/// Create humor routes
pub fn humor_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_humor))
        .route(
            "/:id",
            get(get_humor).patch(update_humor).delete(delete_humor),
        )
        .route(
            "/date/:date",
            get(get_humor_by_date).delete(delete_humor_by_date),
        )
}

impl From<HumorRecord> for HumorResponse {
    fn from(record: HumorRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            value: record.value,
            description: record.description,
            health_based: record.health_based,
        }
    }
}

pub(super) fn humor_patch(req: UpdateHumorRequest) -> HumorPatch {
    HumorPatch {
        value: req.value,
        description: req.description,
        health_based: req.health_based,
    }
}

async fn get_humor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<HumorResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let humor = uow.repository().get_humor_by_id(id).await?;
    uow.commit().await?;

    let humor =
        humor.ok_or_else(|| ApiError::NotFound(format!("No Humor data with id {id}.")))?;
    authorize(&auth, humor.user_id, "humor", id)?;

    Ok(Json(humor.into()))
}

async fn get_humor_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<BTreeMap<i64, HumorResponse>>> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let humors = uow.repository().get_humor_by_date(date).await?;
    uow.commit().await?;

    if humors.is_empty() {
        return Err(ApiError::NotFound(format!("No Humor data in date {date}.")));
    }

    let owned: BTreeMap<i64, HumorResponse> = humors
        .into_iter()
        .filter(|humor| humor.user_id == auth.user_id)
        .map(|humor| (humor.id, humor.into()))
        .collect();

    Ok(Json(owned))
}

async fn create_humor(
    State(state): State<AppState>,
    auth: AuthUser,
    BodyJson(req): BodyJson<CreateHumorRequest>,
) -> ApiResult<(StatusCode, Json<HumorResponse>)> {
    let date = req.date.unwrap_or_else(today);
    let mood = resolve_mood_for_date(&state, auth.user_id, date).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let humor = uow
        .repository()
        .add_humor(NewHumor {
            date,
            value: req.value,
            description: Some(req.description),
            health_based: req.health_based,
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(humor.into())))
}

async fn update_humor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    BodyJson(req): BodyJson<UpdateHumorRequest>,
) -> ApiResult<Json<HumorResponse>> {
    if req.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing request body for humor.".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let humor = uow
        .repository()
        .get_humor_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Humor data with id {id}.")))?;
    authorize(&auth, humor.user_id, "humor", id)?;

    let updated = uow.repository().update_humor(id, humor_patch(req)).await?;
    uow.commit().await?;

    Ok(Json(updated.into()))
}

async fn delete_humor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let humor = uow
        .repository()
        .get_humor_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Humor data with id {id}.")))?;
    authorize(&auth, humor.user_id, "humor", id)?;

    uow.repository().delete_humor(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_humor_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let humors = uow.repository().get_humor_by_date(date).await?;

    if humors.is_empty() {
        return Err(ApiError::NotFound(format!("No Humor data in date {date}.")));
    }

    // All-or-nothing: any foreign row aborts the whole batch.
    for humor in &humors {
        if humor.user_id != auth.user_id {
            let id = humor.id;
            uow.rollback().await?;
            return Err(ApiError::Forbidden(format!("Invalid user for humor {id}.")));
        }
        uow.repository().delete_humor(humor.id).await?;
    }
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
