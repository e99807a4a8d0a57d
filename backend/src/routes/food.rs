//! Food habits tracking routes

use super::{authorize, resolve_mood_for_date, today};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::{FoodPatch, FoodRecord, NewFood, UnitOfWork};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moodlog_shared::types::{CreateFoodRequest, FoodResponse, UpdateFoodRequest};
use moodlog_shared::validation::parse_date;
use std::collections::BTreeMap;

/// Create food habits routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_food))
        .route("/:id", get(get_food).patch(update_food).delete(delete_food))
        .route(
            "/date/:date",
            get(get_food_by_date).delete(delete_food_by_date),
        )
}

impl From<FoodRecord> for FoodResponse {
    fn from(record: FoodRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            value: record.value,
            description: record.description,
        }
    }
}

pub(super) fn food_patch(req: UpdateFoodRequest) -> FoodPatch {
    FoodPatch {
        value: req.value,
        description: req.description,
    }
}

async fn get_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<FoodResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let food = uow.repository().get_food_habits_by_id(id).await?;
    uow.commit().await?;

    let food =
        food.ok_or_else(|| ApiError::NotFound(format!("No Food Habits data with id {id}.")))?;
    authorize(&auth, food.user_id, "food habits", id)?;

    Ok(Json(food.into()))
}

async fn get_food_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<BTreeMap<i64, FoodResponse>>> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let foods = uow.repository().get_food_habits_by_date(date).await?;
    uow.commit().await?;

    if foods.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No Food Habits data in date {date}."
        )));
    }

    let owned: BTreeMap<i64, FoodResponse> = foods
        .into_iter()
        .filter(|food| food.user_id == auth.user_id)
        .map(|food| (food.id, food.into()))
        .collect();

    Ok(Json(owned))
}

async fn create_food(
    State(state): State<AppState>,
    auth: AuthUser,
    BodyJson(req): BodyJson<CreateFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodResponse>)> {
    let date = req.date.unwrap_or_else(today);
    let mood = resolve_mood_for_date(&state, auth.user_id, date).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let food = uow
        .repository()
        .add_food_habits(NewFood {
            date,
            value: req.value,
            description: req.description,
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(food.into())))
}

async fn update_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    BodyJson(req): BodyJson<UpdateFoodRequest>,
) -> ApiResult<Json<FoodResponse>> {
    if req.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing request body for food habits.".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let food = uow
        .repository()
        .get_food_habits_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Food Habits data with id {id}.")))?;
    authorize(&auth, food.user_id, "food habits", id)?;

    let updated = uow
        .repository()
        .update_food_habits(id, food_patch(req))
        .await?;
    uow.commit().await?;

    Ok(Json(updated.into()))
}

async fn delete_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let food = uow
        .repository()
        .get_food_habits_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Food Habits data with id {id}.")))?;
    authorize(&auth, food.user_id, "food habits", id)?;

    uow.repository().delete_food_habits(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_food_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let foods = uow.repository().get_food_habits_by_date(date).await?;

    if foods.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No Food Habits data in date {date}."
        )));
    }

    // All-or-nothing: any foreign row aborts the whole batch.
    for food in &foods {
        if food.user_id != auth.user_id {
            let id = food.id;
            uow.rollback().await?;
            return Err(ApiError::Forbidden(format!(
                "Invalid user for food habits {id}."
            )));
        }
        uow.repository().delete_food_habits(food.id).await?;
    }
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
