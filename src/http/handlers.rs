//! Employee route handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::employee::{Employee, EmployeeInput};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
    })
}

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.service.get_all().await?))
}

pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.service.search(&name).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.service.get_by_id(&id).await?))
}

pub async fn highest_salary(State(state): State<AppState>) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.service.highest_salary().await?))
}

pub async fn top10(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.service.top10_by_earning().await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;
    Ok(Json(state.service.create(&input).await?))
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.service.delete_by_id(&id).await?)
}
