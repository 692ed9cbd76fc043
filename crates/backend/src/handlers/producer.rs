use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::dashboards::d001_actor_summary::ProducerDashboard;
use contracts::domain::a001_batch::aggregate::{Batch, BatchDto, BatchUpdateDto, StatusUpdateDto};
use serde::Deserialize;

use super::{actor_from_claims, parse_uuid, report};
use crate::dashboards::d001_actor_summary::service as dashboard_service;
use crate::domain::a001_batch::{service, transfer};
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize, Default)]
pub struct NotesDto {
    pub notes: Option<String>,
}

/// POST /api/producer/batches
pub async fn register(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<BatchDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    service::register_batch(dto, &actor)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/producer/batches
pub async fn list(CurrentUser(claims): CurrentUser) -> Result<Json<Vec<Batch>>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    service::list_my_registrations(&actor)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/producer/batches/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Batch>, StatusCode> {
    let uuid = parse_uuid(&id)?;
    service::get_batch(uuid).await.map(Json).map_err(report)
}

/// PUT /api/producer/batches/:id
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<BatchUpdateDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    service::update_batch(uuid, dto, &actor)
        .await
        .map(Json)
        .map_err(report)
}

/// DELETE /api/producer/batches/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    service::delete_batch(uuid, &actor)
        .await
        .map(|_| StatusCode::OK)
        .map_err(report)
}

/// POST /api/producer/batches/:id/harvest
pub async fn harvest(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<NotesDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::harvest(uuid, &actor, dto.notes)
        .await
        .map(Json)
        .map_err(report)
}

/// POST /api/producer/batches/:id/quality-check
pub async fn quality_check(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<NotesDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::quality_check(uuid, &actor, dto.notes)
        .await
        .map(Json)
        .map_err(report)
}

/// POST /api/producer/batches/:id/status — forward-only segment advance
pub async fn update_status(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<StatusUpdateDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::producer_update_status(uuid, &actor, dto)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/producer/dashboard
pub async fn dashboard(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<ProducerDashboard>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    dashboard_service::producer_dashboard(actor.id)
        .await
        .map(Json)
        .map_err(report)
}
