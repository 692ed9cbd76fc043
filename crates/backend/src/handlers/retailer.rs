use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::dashboards::d001_actor_summary::RetailerDashboard;
use contracts::domain::a001_batch::aggregate::{Batch, PriceUpdateDto, SaleDto, TransferDto};
use contracts::enums::ActorRole;

use super::{actor_from_claims, parse_uuid, report};
use crate::dashboards::d001_actor_summary::service as dashboard_service;
use crate::domain::a001_batch::{service, transfer};
use crate::system::auth::extractor::CurrentUser;

/// GET /api/retailer/batches/available — batches sitting with distributors
pub async fn available() -> Result<Json<Vec<Batch>>, StatusCode> {
    service::list_available_for(ActorRole::Retailer)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/retailer/batches — current holdings
pub async fn holdings(CurrentUser(claims): CurrentUser) -> Result<Json<Vec<Batch>>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    service::list_my_holdings(&actor)
        .await
        .map(Json)
        .map_err(report)
}

/// POST /api/retailer/batches/:id/claim
pub async fn claim(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<TransferDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::claim_for_retail(uuid, &actor, dto)
        .await
        .map(Json)
        .map_err(report)
}

/// PUT /api/retailer/batches/:id/price
pub async fn update_price(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<PriceUpdateDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::update_price(uuid, &actor, dto)
        .await
        .map(Json)
        .map_err(report)
}

/// POST /api/retailer/batches/:id/sell
pub async fn sell(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<SaleDto>,
) -> Result<Json<Batch>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    let uuid = parse_uuid(&id)?;
    transfer::record_sale(uuid, &actor, dto)
        .await
        .map(Json)
        .map_err(report)
}

/// GET /api/retailer/dashboard
pub async fn dashboard(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<RetailerDashboard>, StatusCode> {
    let actor = actor_from_claims(&claims)?;
    dashboard_service::retailer_dashboard(actor.id)
        .await
        .map(Json)
        .map_err(report)
}
