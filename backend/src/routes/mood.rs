//! Mood routes
//!
//! A mood is the per-date aggregate of a user's tracked entries. Besides
//! plain fetch/delete it supports a structured create (one entry of each
//! category in a single request) and a fan-out patch that applies a field
//! update to every entry of a category.

use super::exercises::exercises_patch;
use super::food::food_patch;
use super::humor::humor_patch;
use super::water::water_patch;
use super::{authorize, resolve_mood_for_date, today};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::{
    MoodWithEntries, NewExercises, NewFood, NewHumor, NewWater, UnitOfWork,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moodlog_shared::types::{CreateMoodRequest, MoodResponse, UpdateMoodRequest};
use moodlog_shared::validation::parse_date;
use std::collections::BTreeMap;

/// Create mood routes
pub fn mood_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_mood))
        .route("/:id", get(get_mood).patch(update_mood).delete(delete_mood))
        .route(
            "/date/:date",
            get(get_mood_by_date).delete(delete_mood_by_date),
        )
}

impl From<MoodWithEntries> for MoodResponse {
    fn from(entry: MoodWithEntries) -> Self {
        Self {
            id: entry.mood.id,
            date: entry.mood.date,
            humors: entry.humors.into_iter().map(Into::into).collect(),
            water_intakes: entry.water_intakes.into_iter().map(Into::into).collect(),
            exercises: entry.exercises.into_iter().map(Into::into).collect(),
            food_habits: entry.food_habits.into_iter().map(Into::into).collect(),
            sleeps: entry.sleeps.into_iter().map(Into::into).collect(),
        }
    }
}

async fn get_mood(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MoodResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let mood = uow.repository().get_mood_by_id(id).await?;
    uow.commit().await?;

    let mood = mood.ok_or_else(|| ApiError::NotFound(format!("No Mood data with id {id}.")))?;
    authorize(&auth, mood.mood.user_id, "mood", id)?;

    Ok(Json(mood.into()))
}

async fn get_mood_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<BTreeMap<i64, MoodResponse>>> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let moods = uow.repository().get_mood_by_date(date).await?;
    uow.commit().await?;

    if moods.is_empty() {
        return Err(ApiError::NotFound(format!("No Mood data in date {date}.")));
    }

    let owned: BTreeMap<i64, MoodResponse> = moods
        .into_iter()
        .filter(|mood| mood.mood.user_id == auth.user_id)
        .map(|mood| (mood.mood.id, mood.into()))
        .collect();

    Ok(Json(owned))
}

/// POST /mood - Structured create of one entry per category
///
/// Each entry is inserted and committed on its own; when a later insert
/// fails, the earlier entries stay in place and the client sees a 500 for
/// the failing category.
async fn create_mood(
    State(state): State<AppState>,
    auth: AuthUser,
    BodyJson(req): BodyJson<CreateMoodRequest>,
) -> ApiResult<StatusCode> {
    let mood_date = req.date.unwrap_or_else(today);
    let mood = resolve_mood_for_date(&state, auth.user_id, mood_date).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    uow.repository()
        .add_humor(NewHumor {
            date: req.humors.date.unwrap_or(mood_date),
            value: req.humors.value,
            description: Some(req.humors.description),
            health_based: req.humors.health_based,
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    uow.repository()
        .add_water_intake(NewWater {
            date: req.water_intakes.date.unwrap_or(mood_date),
            milliliters: req.water_intakes.milliliters,
            description: Some(req.water_intakes.description),
            pee: req.water_intakes.pee,
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    uow.repository()
        .add_exercises(NewExercises {
            date: req.exercises.date.unwrap_or(mood_date),
            minutes: req.exercises.minutes,
            description: Some(req.exercises.description),
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    uow.repository()
        .add_food_habits(NewFood {
            date: req.food_habits.date.unwrap_or(mood_date),
            value: req.food_habits.value,
            description: req.food_habits.description,
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    Ok(StatusCode::CREATED)
}

/// PATCH /mood/{id} - Apply category patches to every entry of the mood
async fn update_mood(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    BodyJson(req): BodyJson<UpdateMoodRequest>,
) -> ApiResult<Json<MoodResponse>> {
    if req.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing request body for mood.".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let mood = uow
        .repository()
        .get_mood_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Mood data with id {id}.")))?;
    authorize(&auth, mood.mood.user_id, "mood", id)?;

    if let Some(patch) = req.humors {
        uow.repository()
            .update_humor_for_mood(id, &humor_patch(patch))
            .await?;
    }
    if let Some(patch) = req.water_intakes {
        uow.repository()
            .update_water_intake_for_mood(id, &water_patch(patch))
            .await?;
    }
    if let Some(patch) = req.exercises {
        uow.repository()
            .update_exercises_for_mood(id, &exercises_patch(patch))
            .await?;
    }
    if let Some(patch) = req.food_habits {
        uow.repository()
            .update_food_habits_for_mood(id, &food_patch(patch))
            .await?;
    }

    let updated = uow
        .repository()
        .get_mood_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Mood data with id {id}.")))?;
    uow.commit().await?;

    Ok(Json(updated.into()))
}

async fn delete_mood(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let mood = uow
        .repository()
        .get_mood_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Mood data with id {id}.")))?;
    authorize(&auth, mood.mood.user_id, "mood", id)?;

    uow.repository().delete_mood(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_mood_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let moods = uow.repository().get_mood_by_date(date).await?;

    if moods.is_empty() {
        return Err(ApiError::NotFound(format!("No Mood data in date {date}.")));
    }

    // All-or-nothing: any foreign row aborts the whole batch.
    for mood in &moods {
        if mood.mood.user_id != auth.user_id {
            let id = mood.mood.id;
            uow.rollback().await?;
            return Err(ApiError::Forbidden(format!("Invalid user for mood {id}.")));
        }
        uow.repository().delete_mood(mood.mood.id).await?;
    }
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
