use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::dashboards::d001_actor_summary::SystemStats;
use contracts::domain::a001_batch::aggregate::{Batch, BatchUpdateDto, StatusUpdateDto};
use contracts::domain::a002_supply_chain_event::aggregate::SupplyChainEvent;

use super::{actor_from_claims, parse_uuid, report};
use crate::dashboards::d001_actor_summary::service as dashboard_service;
use crate::domain::a001_batch::{repository, service, transfer};
use crate::domain::a002_supply_chain_event::service as event_service;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/admin/batches — every record, deleted ones included
pub async fn list_all() -> Result<Json<Vec<Batch>>, StatusCode> {
    match repository::list_all().await {
        Ok(batches) => Ok(Json(batches)),
        Err(e) => {
            tracing::error!("Admin batch listing failed: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/admin/stats
pub async fn stats() -> Result<Json<SystemStats>, StatusCode> {
    dashboard_service::system_stats()
        .await
        .map(Json)
        .map_err(report)
}

/// POST /api/admin/batches/:id/status — override, including EXPIRED
pub async fn override_status(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<StatusUpdateDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::admin_override_status(uuid, &actor, dto)
        .await
        .map(Json)
        .map_err(report)
}

/// DELETE /api/admin/batches/:id — soft delete
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

/// DELETE /api/admin/batches/:id/purge — irreversible removal
pub async fn purge(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    service::purge_batch(uuid, &actor)
        .await
        .map(|_| StatusCode::OK)
        .map_err(report)
}

/// PUT /api/admin/batches/:id — edit any batch
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<BatchUpdateDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    service::admin_update_batch(uuid, dto, &actor)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/admin/batches/:id/events — raw audit trail.
/// The path segment accepts a batch UUID or a batch code.
pub async fn events(Path(id): Path<String>) -> Result<Json<Vec<SupplyChainEvent>>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => match repository::get_by_code(&id).await {
            Ok(Some(batch)) => batch.base.id.value(),
            Ok(None) => return Err(StatusCode::NOT_FOUND),
            Err(e) => {
                tracing::error!("Batch lookup failed: {:#}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        },
    };
    match event_service::list_for_batch(uuid).await {
        Ok(events) => Ok(Json(events)),
        Err(e) => {
            tracing::error!("Event listing failed: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
