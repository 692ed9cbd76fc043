use chrono::Utc;
use contracts::domain::a001_batch::aggregate::{Batch, BatchDto, BatchUpdateDto};
use contracts::domain::a001_batch::journey::BatchJourney;
use contracts::domain::a002_supply_chain_event::aggregate::SupplyChainEvent;
use contracts::domain::common::ChainError;
use contracts::enums::{ActorRole, BatchStatus, EventType};
use uuid::Uuid;

use super::{journey, repository, transfer::Actor};
use crate::domain::a002_supply_chain_event::service as event_service;

/// Register a new batch for the calling producer
pub async fn register_batch(dto: BatchDto, actor: &Actor) -> Result<Batch, ChainError> {
    if actor.role != ActorRole::Producer {
        return Err(ChainError::forbidden(
            "only producers can register batches",
        ));
    }

    let mut batch = Batch::new_for_insert(dto, actor.id, actor.name.clone());
    batch.validate().map_err(ChainError::ValidationFailed)?;
    batch.before_write();
    repository::insert(&batch).await?;

    let event = SupplyChainEvent::new(
        batch.base.id.value(),
        EventType::Harvest,
        actor.name.clone(),
        Some(actor.id),
        batch
            .farm_location
            .clone()
            .or_else(|| batch.city.clone())
            .unwrap_or_else(|| "farm".into()),
        format!("{} registered", batch.base.description),
    )
    .with_status(BatchStatus::Registered);
    if let Err(err) = event_service::append(event).await {
        tracing::warn!("Supply chain event append failed: {:#}", err);
    }

    tracing::info!("Batch {} registered by {}", batch.base.code, actor.name);
    Ok(batch)
}

/// Load an active batch; deleted records are invisible here
pub async fn get_batch(id: Uuid) -> Result<Batch, ChainError> {
    let batch = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("batch {}", id)))?;
    if !batch.is_active() {
        return Err(ChainError::not_found(format!("batch {}", id)));
    }
    Ok(batch)
}

/// Administrative partial update: skips ownership and lifecycle checks,
/// structural validation still applies.
pub async fn admin_update_batch(
    id: Uuid,
    dto: BatchUpdateDto,
    actor: &Actor,
) -> Result<Batch, ChainError> {
    if actor.role != ActorRole::Admin {
        return Err(ChainError::forbidden("only admins can edit any batch"));
    }

    let mut batch = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("batch {}", id)))?;

    let expected = batch.base.metadata.version;
    batch.apply_update(&dto);
    batch.validate().map_err(ChainError::ValidationFailed)?;
    batch.before_write();
    batch.base.metadata.increment_version();

    let written = repository::update_guarded(&batch, expected).await?;
    if !written {
        return Err(ChainError::Conflict);
    }
    tracing::info!("Batch {} edited by admin {}", batch.base.code, actor.name);
    Ok(batch)
}

/// Partial update by the originating producer; only legal while custody is
/// still in the producer segment.
pub async fn update_batch(
    id: Uuid,
    dto: BatchUpdateDto,
    actor: &Actor,
) -> Result<Batch, ChainError> {
    let mut batch = get_batch(id).await?;

    if actor.role != ActorRole::Producer || batch.originator_id != actor.id {
        return Err(ChainError::forbidden(format!(
            "batch {} does not belong to {}",
            batch.base.code, actor.name
        )));
    }
    if !batch.status.is_producer_segment() {
        return Err(ChainError::invalid_state(format!(
            "batch {} already left the producer and can no longer be edited",
            batch.base.code
        )));
    }

    let expected = batch.base.metadata.version;
    batch.apply_update(&dto);
    batch.validate().map_err(ChainError::ValidationFailed)?;
    batch.before_write();
    batch.base.metadata.increment_version();

    let written = repository::update_guarded(&batch, expected).await?;
    if !written {
        return Err(ChainError::Conflict);
    }
    Ok(batch)
}

/// Soft delete: the record stays for traceability, all listings and
/// transitions stop seeing it. Originating producer or admin only.
pub async fn delete_batch(id: Uuid, actor: &Actor) -> Result<(), ChainError> {
    let mut batch = get_batch(id).await?;

    let allowed = actor.role == ActorRole::Admin
        || (actor.role == ActorRole::Producer && batch.originator_id == actor.id);
    if !allowed {
        return Err(ChainError::forbidden(format!(
            "batch {} cannot be deleted by {}",
            batch.base.code, actor.name
        )));
    }

    let expected = batch.base.metadata.version;
    batch.base.metadata.mark_deleted();
    batch.before_write();
    batch.base.metadata.increment_version();

    let written = repository::update_guarded(&batch, expected).await?;
    if !written {
        return Err(ChainError::Conflict);
    }
    tracing::info!("Batch {} deleted by {}", batch.base.code, actor.name);
    Ok(())
}

/// Irreversible removal, originator or admin. Works on soft-deleted
/// records; the audit trail goes with the batch.
pub async fn purge_batch(id: Uuid, actor: &Actor) -> Result<(), ChainError> {
    let batch = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("batch {}", id)))?;

    let allowed = actor.role == ActorRole::Admin
        || (actor.role == ActorRole::Producer && batch.originator_id == actor.id);
    if !allowed {
        return Err(ChainError::forbidden(format!(
            "batch {} cannot be purged by {}",
            batch.base.code, actor.name
        )));
    }

    // events go first so a failure cannot leave audit rows without a batch
    event_service::purge_for_batch(id).await?;
    let removed = repository::hard_delete(id).await?;
    if !removed {
        return Err(ChainError::not_found(format!("batch {}", id)));
    }
    tracing::warn!("Batch {} purged by {}", batch.base.code, actor.name);
    Ok(())
}

/// Batches registered by the producer, newest activity first
pub async fn list_my_registrations(actor: &Actor) -> Result<Vec<Batch>, ChainError> {
    Ok(repository::list_by_originator(actor.id, true).await?)
}

/// Batches currently held by the actor
pub async fn list_my_holdings(actor: &Actor) -> Result<Vec<Batch>, ChainError> {
    Ok(repository::list_by_owner(actor.id, true).await?)
}

/// Batches a given role is allowed to claim next
pub async fn list_available_for(role: ActorRole) -> Result<Vec<Batch>, ChainError> {
    let statuses: &[BatchStatus] = match role {
        ActorRole::Distributor => &[BatchStatus::QualityChecked, BatchStatus::WithProducer],
        ActorRole::Retailer => &[BatchStatus::WithDistributor],
        _ => {
            return Err(ChainError::forbidden(format!(
                "role {} has no claim queue",
                role.code()
            )))
        }
    };
    Ok(repository::list_by_statuses(statuses).await?)
}

/// Public browse: every active batch, optionally narrowed by a free-text
/// query over product name, category, variety and region, and by status.
pub async fn browse(
    query: Option<&str>,
    status: Option<BatchStatus>,
) -> Result<Vec<Batch>, ChainError> {
    let mut batches = repository::list_active().await?;
    if let Some(status) = status {
        batches.retain(|b| b.status == status);
    }
    match query {
        Some(q) if !q.trim().is_empty() => {
            let needle = q.trim().to_lowercase();
            Ok(batches
                .into_iter()
                .filter(|b| matches_query(b, &needle))
                .collect())
        }
        _ => Ok(batches),
    }
}

fn matches_query(batch: &Batch, needle: &str) -> bool {
    let haystacks = [
        Some(batch.base.description.as_str()),
        Some(batch.category.as_str()),
        batch.variety.as_deref(),
        batch.region.as_deref(),
        batch.city.as_deref(),
        Some(batch.base.code.as_str()),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|h| h.to_lowercase().contains(needle))
}

/// Public provenance lookup by QR code. Soft-deleted batches still resolve:
/// a printed code on a sold product must keep answering.
pub async fn get_journey_by_qr(qr_code: &str) -> Result<BatchJourney, ChainError> {
    let batch = repository::get_by_qr_code(qr_code)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("QR code {}", qr_code)))?;
    let events = event_service::list_for_batch(batch.base.id.value()).await?;
    Ok(journey::reconstruct(&batch, &events, Utc::now()))
}

/// Provenance lookup by batch code
pub async fn get_journey_by_code(code: &str) -> Result<BatchJourney, ChainError> {
    let batch = repository::get_by_code(code)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("batch code {}", code)))?;
    let events = event_service::list_for_batch(batch.base.id.value()).await?;
    Ok(journey::reconstruct(&batch, &events, Utc::now()))
}

/// Provenance lookup by batch id
pub async fn get_journey(id: Uuid) -> Result<BatchJourney, ChainError> {
    let batch = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("batch {}", id)))?;
    let events = event_service::list_for_batch(batch.base.id.value()).await?;
    Ok(journey::reconstruct(&batch, &events, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_batch::aggregate::BatchDto;

    #[test]
    fn query_matching_is_case_insensitive_and_spans_fields() {
        let dto = BatchDto {
            description: "Alphonso mangoes".into(),
            category: "Fruit".into(),
            variety: Some("Alphonso".into()),
            quantity: 10.0,
            unit: "kg".into(),
            origin_price: 2.5,
            region: Some("Maharashtra".into()),
            ..Default::default()
        };
        let batch = Batch::new_for_insert(dto, Uuid::new_v4(), "Green Valley".into());

        assert!(matches_query(&batch, "mango"));
        assert!(matches_query(&batch, "fruit"));
        assert!(matches_query(&batch, "maharashtra"));
        assert!(matches_query(&batch, &batch.base.code.to_lowercase()));
        assert!(!matches_query(&batch, "tomato"));
    }
}
