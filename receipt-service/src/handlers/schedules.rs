//! Scheduled-export configuration handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{CreateSchedule, Schedule, UpdateSchedule};
use crate::startup::AppState;

pub async fn list_schedules(
    State(state): State<AppState>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let schedules = state.store.list_schedules().await?;
    Ok(Json(schedules))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Json(payload): Json<CreateSchedule>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = state.store.create_schedule(payload).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSchedule>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = state
        .store
        .update_schedule(id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Schedule not found")))?;
    Ok(Json(schedule))
}

#[derive(Debug, Serialize)]
pub struct DeleteScheduleResponse {
    pub message: String,
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteScheduleResponse>, AppError> {
    let deleted = state.store.delete_schedule(id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Schedule not found")));
    }
    Ok(Json(DeleteScheduleResponse {
        message: "Schedule deleted successfully".to_string(),
    }))
}
