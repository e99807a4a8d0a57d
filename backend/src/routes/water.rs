//! Water intake tracking routes

use super::{authorize, resolve_mood_for_date, today};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::BodyJson;
use crate::repositories::{NewWater, UnitOfWork, WaterPatch, WaterRecord};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use moodlog_shared::types::{CreateWaterRequest, UpdateWaterRequest, WaterResponse};
use moodlog_shared::validation::parse_date;
use std::collections::BTreeMap;

/// Create water intake routes
pub fn water_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_water))
        .route(
            "/:id",
            get(get_water).patch(update_water).delete(delete_water),
        )
        .route(
            "/date/:date",
            get(get_water_by_date).delete(delete_water_by_date),
        )
}

impl From<WaterRecord> for WaterResponse {
    fn from(record: WaterRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            milliliters: record.milliliters,
            description: record.description,
            pee: record.pee,
        }
    }
}

pub(super) fn water_patch(req: UpdateWaterRequest) -> WaterPatch {
    WaterPatch {
        milliliters: req.milliliters,
        description: req.description,
        pee: req.pee,
    }
}

async fn get_water(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<WaterResponse>> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let water = uow.repository().get_water_intake_by_id(id).await?;
    uow.commit().await?;

    let water = water
        .ok_or_else(|| ApiError::NotFound(format!("No Water Intake data with id {id}.")))?;
    authorize(&auth, water.user_id, "water intake", id)?;

    Ok(Json(water.into()))
}

async fn get_water_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<BTreeMap<i64, WaterResponse>>> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let waters = uow.repository().get_water_intake_by_date(date).await?;
    uow.commit().await?;

    if waters.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No Water Intake data in date {date}."
        )));
    }

    let owned: BTreeMap<i64, WaterResponse> = waters
        .into_iter()
        .filter(|water| water.user_id == auth.user_id)
        .map(|water| (water.id, water.into()))
        .collect();

    Ok(Json(owned))
}

async fn create_water(
    State(state): State<AppState>,
    auth: AuthUser,
    BodyJson(req): BodyJson<CreateWaterRequest>,
) -> ApiResult<(StatusCode, Json<WaterResponse>)> {
    let date = req.date.unwrap_or_else(today);
    let mood = resolve_mood_for_date(&state, auth.user_id, date).await?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let water = uow
        .repository()
        .add_water_intake(NewWater {
            date,
            milliliters: req.milliliters,
            description: Some(req.description),
            pee: req.pee,
            mood_id: mood.id,
        })
        .await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(water.into())))
}

async fn update_water(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    BodyJson(req): BodyJson<UpdateWaterRequest>,
) -> ApiResult<Json<WaterResponse>> {
    if req.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing request body for water intake.".to_string(),
        ));
    }

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let water = uow
        .repository()
        .get_water_intake_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Water Intake data with id {id}.")))?;
    authorize(&auth, water.user_id, "water intake", id)?;

    let updated = uow
        .repository()
        .update_water_intake(id, water_patch(req))
        .await?;
    uow.commit().await?;

    Ok(Json(updated.into()))
}

async fn delete_water(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut uow = UnitOfWork::begin(state.db()).await?;
    let water = uow
        .repository()
        .get_water_intake_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Water Intake data with id {id}.")))?;
    authorize(&auth, water.user_id, "water intake", id)?;

    uow.repository().delete_water_intake(id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_water_by_date(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date).map_err(ApiError::BadRequest)?;

    let mut uow = UnitOfWork::begin(state.db()).await?;
    let waters = uow.repository().get_water_intake_by_date(date).await?;

    if waters.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No Water Intake data in date {date}."
        )));
    }

    // All-or-nothing: any foreign row aborts the whole batch.
    for water in &waters {
        if water.user_id != auth.user_id {
            let id = water.id;
            uow.rollback().await?;
            return Err(ApiError::Forbidden(format!(
                "Invalid user for water intake {id}."
            )));
        }
        uow.repository().delete_water_intake(water.id).await?;
    }
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
