use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::jobs::{JobId, JobItemsView, JobService, JobView};
use crate::model::CrawlRequest;
use crate::server::ApiError;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_job(
    State(service): State<JobService>,
    payload: Result<Json<CrawlRequest>, JsonRejection>,
) -> Result<Json<JobView>, ApiError> {
    let Json(request) = payload?;
    let submitted = service.submit(request)?;
    Ok(Json(submitted.view))
}

pub async fn get_job(
    State(service): State<JobService>,
    Path(id): Path<String>,
) -> Result<Json<JobView>, ApiError> {
    service
        .status(&JobId::from(id))
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn get_job_items(
    State(service): State<JobService>,
    Path(id): Path<String>,
) -> Result<Json<JobItemsView>, ApiError> {
    service
        .items(&JobId::from(id))
        .map(Json)
        .ok_or(ApiError::NotFound)
}
