//! Custody transfer engine.
//!
//! Every lifecycle transition goes through here: pure validation first
//! (exists → active → role/ownership → state → quantity), then a guarded
//! write against the version the caller read. Event log appends happen
//! after the commit and never fail the transition.

use contracts::domain::a001_batch::aggregate::{
    Batch, PriceUpdateDto, RetailerTransferDto, SaleDto, StatusUpdateDto, TransferDto,
};
use contracts::domain::a002_supply_chain_event::aggregate::SupplyChainEvent;
use contracts::domain::common::ChainError;
use contracts::enums::{ActorRole, BatchStatus, EventType};
use uuid::Uuid;

use super::repository;
use crate::domain::a002_supply_chain_event::service as event_service;
use crate::system::users::service as users_service;

/// Authenticated party performing a transfer operation
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: ActorRole,
}

// ============================================================================
// Pure validation
// ============================================================================

/// Legality table for non-administrative transitions
pub fn can_transition(from: BatchStatus, to: BatchStatus) -> bool {
    use BatchStatus::*;
    matches!(
        (from, to),
        (Registered, Harvested)
            | (Harvested, QualityChecked)
            | (QualityChecked, WithProducer)
            | (QualityChecked, WithDistributor)
            | (WithProducer, WithDistributor)
            | (WithDistributor, WithRetailer)
            | (WithRetailer, Sold)
    )
}

fn ensure_active(batch: &Batch) -> Result<(), ChainError> {
    if batch.is_active() {
        Ok(())
    } else {
        Err(ChainError::invalid_state(format!(
            "batch {} has been deleted",
            batch.base.code
        )))
    }
}

fn ensure_role(actor: &Actor, required: ActorRole) -> Result<(), ChainError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(ChainError::forbidden(format!(
            "operation requires role {}, actor has {}",
            required.code(),
            actor.role.code()
        )))
    }
}

fn ensure_owner(batch: &Batch, actor: &Actor) -> Result<(), ChainError> {
    if batch.current_owner_id == actor.id {
        Ok(())
    } else {
        Err(ChainError::forbidden(format!(
            "batch {} is not held by {}",
            batch.base.code, actor.name
        )))
    }
}

fn ensure_transition(batch: &Batch, to: BatchStatus) -> Result<(), ChainError> {
    if can_transition(batch.status, to) {
        Ok(())
    } else {
        Err(ChainError::invalid_state(format!(
            "cannot move batch {} from {} to {}",
            batch.base.code, batch.status, to
        )))
    }
}

fn ensure_quantity(requested: f64, available: f64) -> Result<(), ChainError> {
    if !(requested > 0.0) || requested > available {
        Err(ChainError::InsufficientQuantity {
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

pub fn validate_harvest(batch: &Batch, actor: &Actor) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Producer)?;
    ensure_owner(batch, actor)?;
    ensure_transition(batch, BatchStatus::Harvested)
}

pub fn validate_quality_check(batch: &Batch, actor: &Actor) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Producer)?;
    ensure_owner(batch, actor)?;
    ensure_transition(batch, BatchStatus::QualityChecked)
}

/// Producer-side advance along the producer segment. Forward-only: the rank
/// of the target must exceed the rank of the current status.
pub fn validate_producer_status_update(
    batch: &Batch,
    actor: &Actor,
    target: BatchStatus,
) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Producer)?;
    ensure_owner(batch, actor)?;
    match (batch.status.producer_rank(), target.producer_rank()) {
        (Some(from), Some(to)) if to > from => Ok(()),
        _ => Err(ChainError::invalid_state(format!(
            "producer cannot move batch {} from {} to {}",
            batch.base.code, batch.status, target
        ))),
    }
}

pub fn validate_distributor_claim(
    batch: &Batch,
    actor: &Actor,
    requested_quantity: f64,
) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Distributor)?;
    ensure_transition(batch, BatchStatus::WithDistributor)?;
    ensure_quantity(requested_quantity, batch.quantity)
}

pub fn validate_retailer_claim(
    batch: &Batch,
    actor: &Actor,
    requested_quantity: f64,
) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Retailer)?;
    ensure_transition(batch, BatchStatus::WithRetailer)?;
    ensure_quantity(requested_quantity, batch.quantity)
}

pub fn validate_send_to_retailer(
    batch: &Batch,
    actor: &Actor,
    quantity: f64,
) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Distributor)?;
    ensure_owner(batch, actor)?;
    ensure_transition(batch, BatchStatus::WithRetailer)?;
    ensure_quantity(quantity, batch.quantity)
}

/// Price updates are open to the current owner only while the batch sits in
/// distribution or retail custody.
pub fn validate_price_update(batch: &Batch, actor: &Actor) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_owner(batch, actor)?;
    if !matches!(
        batch.status,
        BatchStatus::WithDistributor | BatchStatus::WithRetailer
    ) {
        return Err(ChainError::invalid_state(format!(
            "batch {} is {} and cannot be repriced",
            batch.base.code, batch.status
        )));
    }
    Ok(())
}

pub fn validate_sale(batch: &Batch, actor: &Actor, sold_quantity: f64) -> Result<(), ChainError> {
    ensure_active(batch)?;
    ensure_role(actor, ActorRole::Retailer)?;
    ensure_owner(batch, actor)?;
    ensure_transition(batch, BatchStatus::Sold)?;
    ensure_quantity(sold_quantity, batch.quantity)
}

// ============================================================================
// Engine operations
// ============================================================================

async fn load(batch_id: Uuid) -> Result<Batch, ChainError> {
    repository::get_by_id(batch_id)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("batch {}", batch_id)))
}

/// Guarded commit: bump version, write back, map a lost race to `Conflict`
async fn commit(batch: &mut Batch, expected_version: i32) -> Result<(), ChainError> {
    batch.before_write();
    batch.base.metadata.increment_version();
    let written = repository::update_guarded(batch, expected_version).await?;
    if written {
        Ok(())
    } else {
        Err(ChainError::Conflict)
    }
}

/// Append to the audit trail after a committed transition. Best effort: a
/// failed append is logged and swallowed, the committed transition stands.
async fn record_event(event: SupplyChainEvent) {
    if let Err(err) = event_service::append(event).await {
        tracing::warn!("Supply chain event append failed: {:#}", err);
    }
}

fn event_location(batch: &Batch, fallback: &str) -> String {
    batch
        .farm_location
        .clone()
        .or_else(|| batch.city.clone())
        .unwrap_or_else(|| fallback.to_string())
}

pub async fn harvest(
    batch_id: Uuid,
    actor: &Actor,
    notes: Option<String>,
) -> Result<Batch, ChainError> {
    let mut batch = load(batch_id).await?;
    validate_harvest(&batch, actor)?;

    let expected = batch.base.metadata.version;
    batch.status = BatchStatus::Harvested;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::Harvest,
        actor.name.clone(),
        Some(actor.id),
        event_location(&batch, "farm"),
        format!("{} harvested", batch.base.description),
    )
    .with_status(BatchStatus::Harvested);
    if let Some(notes) = notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    tracing::info!("Batch {} harvested by {}", batch.base.code, actor.name);
    Ok(batch)
}

pub async fn quality_check(
    batch_id: Uuid,
    actor: &Actor,
    notes: Option<String>,
) -> Result<Batch, ChainError> {
    let mut batch = load(batch_id).await?;
    validate_quality_check(&batch, actor)?;

    let expected = batch.base.metadata.version;
    batch.status = BatchStatus::QualityChecked;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::QualityCheck,
        actor.name.clone(),
        Some(actor.id),
        event_location(&batch, "farm"),
        format!("{} passed quality check", batch.base.description),
    )
    .with_status(BatchStatus::QualityChecked);
    if let Some(notes) = notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    Ok(batch)
}

pub async fn producer_update_status(
    batch_id: Uuid,
    actor: &Actor,
    dto: StatusUpdateDto,
) -> Result<Batch, ChainError> {
    let mut batch = load(batch_id).await?;
    validate_producer_status_update(&batch, actor, dto.status)?;

    let expected = batch.base.metadata.version;
    batch.status = dto.status;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::StatusUpdate,
        actor.name.clone(),
        Some(actor.id),
        event_location(&batch, "farm"),
        format!("Status advanced to {}", dto.status.display_name()),
    )
    .with_status(dto.status);
    if let Some(notes) = dto.notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    Ok(batch)
}

/// Distributor takes custody of an available batch. Quantity is cut down to
/// what was requested; the remainder is considered retained by the producer
/// outside the system.
pub async fn claim_for_distribution(
    batch_id: Uuid,
    actor: &Actor,
    dto: TransferDto,
) -> Result<Batch, ChainError> {
    let mut batch = load(batch_id).await?;
    validate_distributor_claim(&batch, actor, dto.requested_quantity)?;

    let expected = batch.base.metadata.version;
    batch.status = BatchStatus::WithDistributor;
    batch.current_owner_id = actor.id;
    batch.current_owner_name = actor.name.clone();
    batch.quantity = dto.requested_quantity;
    batch.current_price = dto.price;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::Transit,
        actor.name.clone(),
        Some(actor.id),
        "distribution center".into(),
        format!(
            "Custody transferred to distributor {} ({} {})",
            actor.name, dto.requested_quantity, batch.unit
        ),
    )
    .with_status(BatchStatus::WithDistributor);
    if let Some(notes) = dto.notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    tracing::info!(
        "Batch {} claimed by distributor {}",
        batch.base.code,
        actor.name
    );
    Ok(batch)
}

/// Retailer pulls a batch out of distribution
pub async fn claim_for_retail(
    batch_id: Uuid,
    actor: &Actor,
    dto: TransferDto,
) -> Result<Batch, ChainError> {
    let mut batch = load(batch_id).await?;
    validate_retailer_claim(&batch, actor, dto.requested_quantity)?;

    let expected = batch.base.metadata.version;
    batch.status = BatchStatus::WithRetailer;
    batch.current_owner_id = actor.id;
    batch.current_owner_name = actor.name.clone();
    batch.quantity = dto.requested_quantity;
    batch.current_price = dto.price;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::Delivery,
        actor.name.clone(),
        Some(actor.id),
        "retail store".into(),
        format!(
            "Custody transferred to retailer {} ({} {})",
            actor.name, dto.requested_quantity, batch.unit
        ),
    )
    .with_status(BatchStatus::WithRetailer);
    if let Some(notes) = dto.notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    Ok(batch)
}

/// Distributor pushes a batch to a named retailer. The retailer account must
/// exist, hold the retailer role and be active.
pub async fn send_to_retailer(
    batch_id: Uuid,
    actor: &Actor,
    dto: RetailerTransferDto,
) -> Result<Batch, ChainError> {
    let mut batch = load(batch_id).await?;
    validate_send_to_retailer(&batch, actor, dto.quantity)?;

    let retailer = users_service::get_user(dto.retailer_id)
        .await?
        .ok_or_else(|| ChainError::not_found(format!("retailer {}", dto.retailer_id)))?;
    if retailer.role != ActorRole::Retailer || !retailer.is_active {
        return Err(ChainError::ValidationFailed(format!(
            "user {} is not an active retailer",
            retailer.username
        )));
    }

    let expected = batch.base.metadata.version;
    batch.status = BatchStatus::WithRetailer;
    batch.current_owner_id = dto.retailer_id;
    batch.current_owner_name = retailer
        .full_name
        .clone()
        .unwrap_or_else(|| retailer.username.clone());
    batch.quantity = dto.quantity;
    batch.current_price = dto.price;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::Delivery,
        actor.name.clone(),
        Some(actor.id),
        "retail store".into(),
        format!(
            "Delivered to retailer {} ({} {})",
            batch.current_owner_name, dto.quantity, batch.unit
        ),
    )
    .with_status(BatchStatus::WithRetailer);
    if let Some(notes) = dto.notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    Ok(batch)
}

pub async fn update_price(
    batch_id: Uuid,
    actor: &Actor,
    dto: PriceUpdateDto,
) -> Result<Batch, ChainError> {
    if dto.price < 0.0 {
        return Err(ChainError::ValidationFailed(
            "price cannot be negative".into(),
        ));
    }

    let mut batch = load(batch_id).await?;
    validate_price_update(&batch, actor)?;

    let expected = batch.base.metadata.version;
    batch.current_price = dto.price;
    commit(&mut batch, expected).await?;

    record_event(
        SupplyChainEvent::new(
            batch_id,
            EventType::StatusUpdate,
            actor.name.clone(),
            Some(actor.id),
            event_location(&batch, "in transit"),
            format!("Price updated to {:.2}", dto.price),
        ),
    )
    .await;

    Ok(batch)
}

/// Final sale by the retailer. Quantity and price collapse to what actually
/// sold; when a buyer is named, custody is reassigned to them.
pub async fn record_sale(
    batch_id: Uuid,
    actor: &Actor,
    dto: SaleDto,
) -> Result<Batch, ChainError> {
    if dto.final_price < 0.0 {
        return Err(ChainError::ValidationFailed(
            "final price cannot be negative".into(),
        ));
    }

    let mut batch = load(batch_id).await?;
    validate_sale(&batch, actor, dto.sold_quantity)?;

    let expected = batch.base.metadata.version;
    batch.status = BatchStatus::Sold;
    batch.quantity = dto.sold_quantity;
    batch.current_price = dto.final_price;
    if let Some(buyer_id) = dto.buyer_id {
        batch.current_owner_id = buyer_id;
        batch.current_owner_name = dto.buyer_name.clone().unwrap_or_else(|| "buyer".into());
    }
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::StatusUpdate,
        actor.name.clone(),
        Some(actor.id),
        "retail store".into(),
        format!(
            "Sold {} {} at {:.2}",
            dto.sold_quantity, batch.unit, dto.final_price
        ),
    )
    .with_status(BatchStatus::Sold);
    if let Some(notes) = dto.notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    tracing::info!("Batch {} sold by {}", batch.base.code, actor.name);
    Ok(batch)
}

/// Administrative override: any status to any status, including `Expired`.
/// Bypasses ownership and the legality table but still records the move.
pub async fn admin_override_status(
    batch_id: Uuid,
    actor: &Actor,
    dto: StatusUpdateDto,
) -> Result<Batch, ChainError> {
    ensure_role(actor, ActorRole::Admin)?;

    let mut batch = load(batch_id).await?;
    ensure_active(&batch)?;

    let previous = batch.status;
    let expected = batch.base.metadata.version;
    batch.status = dto.status;
    commit(&mut batch, expected).await?;

    let mut event = SupplyChainEvent::new(
        batch_id,
        EventType::StatusUpdate,
        actor.name.clone(),
        Some(actor.id),
        "system".into(),
        format!(
            "Administrative override: {} to {}",
            previous.display_name(),
            dto.status.display_name()
        ),
    )
    .with_status(dto.status);
    if let Some(notes) = dto.notes {
        event = event.with_condition(notes);
    }
    record_event(event).await;

    tracing::warn!(
        "Admin {} overrode batch {} status {} -> {}",
        actor.name,
        batch.base.code,
        previous,
        dto.status
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_batch::aggregate::BatchDto;

    fn producer() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "Green Valley".into(),
            role: ActorRole::Producer,
        }
    }

    fn distributor() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "FreshLine Logistics".into(),
            role: ActorRole::Distributor,
        }
    }

    fn retailer() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "Corner Grocer".into(),
            role: ActorRole::Retailer,
        }
    }

    fn batch_owned_by(actor: &Actor, status: BatchStatus, quantity: f64) -> Batch {
        let dto = BatchDto {
            description: "Alphonso mangoes".into(),
            category: "Fruit".into(),
            quantity,
            unit: "kg".into(),
            origin_price: 2.5,
            ..Default::default()
        };
        let mut batch = Batch::new_for_insert(dto, actor.id, actor.name.clone());
        batch.status = status;
        batch
    }

    #[test]
    fn legality_table_matches_lifecycle() {
        use BatchStatus::*;
        let legal = [
            (Registered, Harvested),
            (Harvested, QualityChecked),
            (QualityChecked, WithProducer),
            (QualityChecked, WithDistributor),
            (WithProducer, WithDistributor),
            (WithDistributor, WithRetailer),
            (WithRetailer, Sold),
        ];
        for from in BatchStatus::all() {
            for to in BatchStatus::all() {
                let expected = legal.contains(&(from, to));
                assert_eq!(can_transition(from, to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn terminal_statuses_are_absorbing() {
        for to in BatchStatus::all() {
            assert!(!can_transition(BatchStatus::Sold, to));
            assert!(!can_transition(BatchStatus::Expired, to));
        }
    }

    #[test]
    fn retailer_cannot_move_back_to_distributor() {
        assert!(!can_transition(
            BatchStatus::WithRetailer,
            BatchStatus::WithDistributor
        ));
    }

    #[test]
    fn harvest_requires_producer_ownership() {
        let owner = producer();
        let batch = batch_owned_by(&owner, BatchStatus::Registered, 100.0);
        assert!(validate_harvest(&batch, &owner).is_ok());

        let other = producer();
        assert!(matches!(
            validate_harvest(&batch, &other),
            Err(ChainError::Forbidden(_))
        ));

        let wrong_role = distributor();
        assert!(matches!(
            validate_harvest(&batch, &wrong_role),
            Err(ChainError::Forbidden(_))
        ));
    }

    #[test]
    fn deleted_batch_rejects_transitions_as_invalid_state() {
        let owner = producer();
        let mut batch = batch_owned_by(&owner, BatchStatus::Registered, 100.0);
        batch.base.metadata.mark_deleted();
        assert!(matches!(
            validate_harvest(&batch, &owner),
            Err(ChainError::InvalidState(_))
        ));
    }

    #[test]
    fn producer_segment_is_forward_only() {
        let owner = producer();
        let batch = batch_owned_by(&owner, BatchStatus::QualityChecked, 100.0);

        assert!(validate_producer_status_update(&batch, &owner, BatchStatus::WithProducer).is_ok());
        assert!(matches!(
            validate_producer_status_update(&batch, &owner, BatchStatus::Harvested),
            Err(ChainError::InvalidState(_))
        ));
        assert!(matches!(
            validate_producer_status_update(&batch, &owner, BatchStatus::QualityChecked),
            Err(ChainError::InvalidState(_))
        ));
        // custody segments are out of the producer's reach
        assert!(matches!(
            validate_producer_status_update(&batch, &owner, BatchStatus::WithDistributor),
            Err(ChainError::InvalidState(_))
        ));
    }

    #[test]
    fn distributor_claim_checks_state_then_quantity() {
        let owner = producer();
        let dist = distributor();

        let available = batch_owned_by(&owner, BatchStatus::QualityChecked, 100.0);
        assert!(validate_distributor_claim(&available, &dist, 60.0).is_ok());
        assert!(validate_distributor_claim(&available, &dist, 100.0).is_ok());

        let with_producer = batch_owned_by(&owner, BatchStatus::WithProducer, 100.0);
        assert!(validate_distributor_claim(&with_producer, &dist, 60.0).is_ok());

        let too_early = batch_owned_by(&owner, BatchStatus::Registered, 100.0);
        assert!(matches!(
            validate_distributor_claim(&too_early, &dist, 60.0),
            Err(ChainError::InvalidState(_))
        ));

        assert!(matches!(
            validate_distributor_claim(&available, &dist, 100.1),
            Err(ChainError::InsufficientQuantity { .. })
        ));
        assert!(matches!(
            validate_distributor_claim(&available, &dist, 0.0),
            Err(ChainError::InsufficientQuantity { .. })
        ));
    }

    #[test]
    fn claim_succeeds_iff_quantity_fits() {
        let owner = producer();
        let dist = distributor();
        let batch = batch_owned_by(&owner, BatchStatus::QualityChecked, 50.0);

        for requested in [0.5, 25.0, 50.0, 50.0001, 75.0] {
            let ok = validate_distributor_claim(&batch, &dist, requested).is_ok();
            assert_eq!(ok, requested > 0.0 && requested <= batch.quantity);
        }
    }

    #[test]
    fn sale_requires_retail_custody() {
        let shop = retailer();
        let batch = batch_owned_by(&shop, BatchStatus::WithRetailer, 40.0);
        assert!(validate_sale(&batch, &shop, 40.0).is_ok());
        assert!(validate_sale(&batch, &shop, 10.0).is_ok());
        assert!(matches!(
            validate_sale(&batch, &shop, 41.0),
            Err(ChainError::InsufficientQuantity { .. })
        ));

        let sold = batch_owned_by(&shop, BatchStatus::Sold, 40.0);
        assert!(matches!(
            validate_sale(&sold, &shop, 10.0),
            Err(ChainError::InvalidState(_))
        ));

        let not_mine = batch_owned_by(&retailer(), BatchStatus::WithRetailer, 40.0);
        assert!(matches!(
            validate_sale(&not_mine, &shop, 10.0),
            Err(ChainError::Forbidden(_))
        ));
    }

    #[test]
    fn repricing_is_limited_to_custody_segments() {
        let dist = distributor();
        let held = batch_owned_by(&dist, BatchStatus::WithDistributor, 40.0);
        assert!(validate_price_update(&held, &dist).is_ok());

        let shop = retailer();
        let live = batch_owned_by(&shop, BatchStatus::WithRetailer, 40.0);
        assert!(validate_price_update(&live, &shop).is_ok());

        // the producer segment has its own price field; no repricing there
        let owner = producer();
        let registered = batch_owned_by(&owner, BatchStatus::Registered, 40.0);
        assert!(matches!(
            validate_price_update(&registered, &owner),
            Err(ChainError::InvalidState(_))
        ));

        let sold = batch_owned_by(&shop, BatchStatus::Sold, 40.0);
        assert!(matches!(
            validate_price_update(&sold, &shop),
            Err(ChainError::InvalidState(_))
        ));

        let expired = batch_owned_by(&shop, BatchStatus::Expired, 40.0);
        assert!(matches!(
            validate_price_update(&expired, &shop),
            Err(ChainError::InvalidState(_))
        ));
    }

    #[test]
    fn ownership_is_checked_before_state() {
        // a retailer who does not hold the batch gets Forbidden even though
        // the state transition itself would be illegal too
        let shop = retailer();
        let foreign = batch_owned_by(&retailer(), BatchStatus::Sold, 40.0);
        assert!(matches!(
            validate_sale(&foreign, &shop, 10.0),
            Err(ChainError::Forbidden(_))
        ));
    }
}
