//! Sleep tracking routes

use super::{authorize, resolve_mood_for_date, today};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::{NewSleep, SleepPatch, SleepRecord, UnitOfWork};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moodlog_shared::types::{CreateSleepRequest, SleepResponse, UpdateSleepRequest};
use moodlog_shared::validation::parse_date;
use std::collections::BTreeMap;

/// Create sleep routes
pub fn sleep_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sleep))
        .route(
            "/:id",
            get(get_sleep).patch(update_sleep).delete(delete_sleep),
        )
        .route(
            "/date/:date",
            get(get_sleep_by_date).delete(delete_sleep_by_date),
        )
}

impl From<SleepRecord> for SleepResponse {
    fn from(record: SleepRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            value: record.value,
            minutes: record.minutes,
            description: record.description,
        }
    }
}

async fn get_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<SleepResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let sleep = uow.repository().get_sleep_by_id(id).await?;
    uow.commit().await?;

    let sleep =
        sleep.ok_or_else(|| ApiError::NotFound(format!("No Sleep data with id {id}.")))?;
    authorize(&auth, sleep.user_id, "sleep", id)?;

    Ok(Json(sleep.into()))
}

async fn get_sleep_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<BTreeMap<i64, SleepResponse>>> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let sleeps = uow.repository().get_sleep_by_date(date).await?;
    uow.commit().await?;

    if sleeps.is_empty() {
        return Err(ApiError::NotFound(format!("No Sleep data in date {date}.")));
    }

    let owned: BTreeMap<i64, SleepResponse> = sleeps
        .into_iter()
        .filter(|sleep| sleep.user_id == auth.user_id)
        .map(|sleep| (sleep.id, sleep.into()))
        .collect();

    Ok(Json(owned))
}

async fn create_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    BodyJson(req): BodyJson<CreateSleepRequest>,
) -> ApiResult<(StatusCode, Json<SleepResponse>)> {
    let date = req.date.unwrap_or_else(today);
    let mood = resolve_mood_for_date(&state, auth.user_id, date).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let sleep = uow
        .repository()
        .add_sleep(NewSleep {
            date,
            value: req.value,
            minutes: req.minutes,
            description: Some(req.description),
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(sleep.into())))
}

async fn update_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    BodyJson(req): BodyJson<UpdateSleepRequest>,
) -> ApiResult<Json<SleepResponse>> {
    if req.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing request body for sleep.".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let sleep = uow
        .repository()
        .get_sleep_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Sleep data with id {id}.")))?;
    authorize(&auth, sleep.user_id, "sleep", id)?;

    let updated = uow
        .repository()
        .update_sleep(
            id,
            SleepPatch {
                value: req.value,
                minutes: req.minutes,
                description: req.description,
            },
        )
        .await?;
    uow.commit().await?;

    Ok(Json(updated.into()))
}

async fn delete_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let sleep = uow
        .repository()
        .get_sleep_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Sleep data with id {id}.")))?;
    authorize(&auth, sleep.user_id, "sleep", id)?;

    uow.repository().delete_sleep(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_sleep_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let sleeps = uow.repository().get_sleep_by_date(date).await?;

    if sleeps.is_empty() {
        return Err(ApiError::NotFound(format!("No Sleep data in date {date}.")));
    }

    // All-or-nothing: any foreign row aborts the whole batch.
    for sleep in &sleeps {
        if sleep.user_id != auth.user_id {
            let id = sleep.id;
            uow.rollback().await?;
            return Err(ApiError::Forbidden(format!("Invalid user for sleep {id}.")));
        }
        uow.repository().delete_sleep(sleep.id).await?;
    }
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
