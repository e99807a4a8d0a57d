//! Exercises tracking routes

use super::{authorize, resolve_mood_for_date, today};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::{ExercisesPatch, ExercisesRecord, NewExercises, UnitOfWork};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moodlog_shared::types::{CreateExercisesRequest, ExercisesResponse, UpdateExercisesRequest};
use moodlog_shared::validation::parse_date;
use std::collections::BTreeMap;

/// Create exercises routes
pub fn exercises_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exercises))
        .route(
            "/:id",
            get(get_exercises)
                .patch(update_exercises)
                .delete(delete_exercises),
        )
        .route(
            "/date/:date",
            get(get_exercises_by_date).delete(delete_exercises_by_date),
        )
}

impl From<ExercisesRecord> for ExercisesResponse {
    fn from(record: ExercisesRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            minutes: record.minutes,
            description: record.description,
        }
    }
}

pub(super) fn exercises_patch(req: UpdateExercisesRequest) -> ExercisesPatch {
    ExercisesPatch {
        minutes: req.minutes,
        description: req.description,
    }
}

async fn get_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ExercisesResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let exercises = uow.repository().get_exercises_by_id(id).await?;
    uow.commit().await?;

    let exercises =
        exercises.ok_or_else(|| ApiError::NotFound(format!("No Exercises data with id {id}.")))?;
    authorize(&auth, exercises.user_id, "exercises", id)?;

    Ok(Json(exercises.into()))
}

async fn get_exercises_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<BTreeMap<i64, ExercisesResponse>>> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let exercises = uow.repository().get_exercises_by_date(date).await?;
    uow.commit().await?;

    if exercises.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No Exercises data in date {date}."
        )));
    }

    let owned: BTreeMap<i64, ExercisesResponse> = exercises
        .into_iter()
        .filter(|entry| entry.user_id == auth.user_id)
        .map(|entry| (entry.id, entry.into()))
        .collect();

    Ok(Json(owned))
}

async fn create_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    BodyJson(req): BodyJson<CreateExercisesRequest>,
) -> ApiResult<(StatusCode, Json<ExercisesResponse>)> {
    let date = req.date.unwrap_or_else(today);
    let mood = resolve_mood_for_date(&state, auth.user_id, date).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let exercises = uow
        .repository()
        .add_exercises(NewExercises {
            date,
            minutes: req.minutes,
            description: Some(req.description),
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(exercises.into())))
}

async fn update_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    BodyJson(req): BodyJson<UpdateExercisesRequest>,
) -> ApiResult<Json<ExercisesResponse>> {
    if req.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing request body for exercises.".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let exercises = uow
        .repository()
        .get_exercises_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Exercises data with id {id}.")))?;
    authorize(&auth, exercises.user_id, "exercises", id)?;

    let updated = uow
        .repository()
        .update_exercises(id, exercises_patch(req))
        .await?;
    uow.commit().await?;

    Ok(Json(updated.into()))
}

async fn delete_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let exercises = uow
        .repository()
        .get_exercises_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Exercises data with id {id}.")))?;
    authorize(&auth, exercises.user_id, "exercises", id)?;

    uow.repository().delete_exercises(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_exercises_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let exercises = uow.repository().get_exercises_by_date(date).await?;

    if exercises.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No Exercises data in date {date}."
        )));
    }

    // All-or-nothing: any foreign row aborts the whole batch.
    for entry in &exercises {
        if entry.user_id != auth.user_id {
            let id = entry.id;
            uow.rollback().await?;
            return Err(ApiError::Forbidden(format!(
                "Invalid user for exercises {id}."
            )));
        }
        uow.repository().delete_exercises(entry.id).await?;
    }
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
