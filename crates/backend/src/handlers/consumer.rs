use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_batch::aggregate::Batch;
use contracts::domain::a001_batch::journey::BatchJourney;
use contracts::enums::BatchStatus;
use serde::Deserialize;

use super::{parse_uuid, report};
use crate::domain::a001_batch::service;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// GET /api/consumer/batches?q=...&status=... — public browse and search
pub async fn browse(
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Batch>>, StatusCode> {
    let status = match params.status.as_deref() {
        Some(code) => Some(BatchStatus::from_code(code).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };
    service::browse(params.q.as_deref(), status)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/consumer/batches/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Batch>, StatusCode> {
    let uuid = parse_uuid(&id)?;
    service::get_batch(uuid).await.map(Json).map_err(report)
}

/// GET /api/consumer/batches/:id/journey
pub async fn journey_by_id(Path(id): Path<String>) -> Result<Json<BatchJourney>, StatusCode> {
    let uuid = parse_uuid(&id)?;
    service::get_journey(uuid).await.map(Json).map_err(report)
}

/// GET /api/consumer/batches/qr/:qr — public provenance lookup
pub async fn journey_by_qr(Path(qr): Path<String>) -> Result<Json<BatchJourney>, StatusCode> {
    service::get_journey_by_qr(&qr).await.map(Json).map_err(report)
}

/// GET /api/consumer/batches/code/:code
pub async fn journey_by_code(Path(code): Path<String>) -> Result<Json<BatchJourney>, StatusCode> {
    service::get_journey_by_code(&code)
        .await
        .map(Json)
        .map_err(report)
}
