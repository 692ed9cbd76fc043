//! Provenance reconstruction.
//!
//! Builds the public journey answer from the batch record plus its event
//! log. The batch record is authoritative for custody and prices; events
//! contribute exact stage timestamps, locations and notes. A stage whose
//! event is missing falls back to the batch's own timestamps, so a journey
//! can always be produced.

use chrono::{DateTime, Utc};
use contracts::domain::a001_batch::aggregate::Batch;
use contracts::domain::a001_batch::journey::{BatchJourney, ChainStage, JourneyStep};
use contracts::domain::a002_supply_chain_event::aggregate::SupplyChainEvent;
use contracts::enums::{ActorRole, BatchStatus};

/// Reconstruct the journey. `events` must be ordered newest first, the way
/// the event repository returns them.
pub fn reconstruct(
    batch: &Batch,
    events: &[SupplyChainEvent],
    now: DateTime<Utc>,
) -> BatchJourney {
    let mut steps = Vec::with_capacity(4);

    steps.push(producer_step(batch, events));

    if stage_reached(batch.status, BatchStatus::WithDistributor) {
        steps.push(custody_step(
            batch,
            events,
            BatchStatus::WithDistributor,
            ChainStage::Distributor,
            ActorRole::Distributor,
            "distribution center",
        ));
    }
    if stage_reached(batch.status, BatchStatus::WithRetailer) {
        steps.push(custody_step(
            batch,
            events,
            BatchStatus::WithRetailer,
            ChainStage::Retailer,
            ActorRole::Retailer,
            "retail store",
        ));
    }
    if stage_reached(batch.status, BatchStatus::Sold) {
        steps.push(consumer_step(batch, events));
    }

    let days_in_chain = batch.days_in_chain(now);

    BatchJourney {
        batch: batch.clone(),
        stage_count: steps.len(),
        steps,
        days_in_chain,
        current_stage: ChainStage::from_status(batch.status),
        batch_code: batch.base.code.clone(),
        qr_code: batch.qr_code.clone(),
    }
}

/// Stage inclusion is a function of the current status alone; the event log
/// only contributes timestamps, actors and notes to the included steps.
fn stage_reached(status: BatchStatus, stage_status: BatchStatus) -> bool {
    match stage_status {
        BatchStatus::WithDistributor => matches!(
            status,
            BatchStatus::WithDistributor | BatchStatus::WithRetailer | BatchStatus::Sold
        ),
        BatchStatus::WithRetailer => {
            matches!(status, BatchStatus::WithRetailer | BatchStatus::Sold)
        }
        BatchStatus::Sold => status == BatchStatus::Sold,
        _ => false,
    }
}

/// Latest transition event for the given post-status, if recorded
fn transition_event<'a>(
    events: &'a [SupplyChainEvent],
    status: BatchStatus,
) -> Option<&'a SupplyChainEvent> {
    events.iter().find(|e| e.status == Some(status))
}

fn producer_step(batch: &Batch, events: &[SupplyChainEvent]) -> JourneyStep {
    let status = if batch.status.is_producer_segment() || batch.status == BatchStatus::Expired {
        batch.status
    } else {
        BatchStatus::WithProducer
    };
    let notes = events
        .iter()
        .filter(|e| e.status.map_or(false, |s| s.is_producer_segment()))
        .find_map(|e| e.condition_note.clone())
        .unwrap_or_default();

    JourneyStep {
        stage: ChainStage::Producer,
        actor_name: batch.originator_name.clone(),
        actor_role: ActorRole::Producer.code().to_string(),
        status,
        price: batch.origin_price,
        timestamp: batch.base.metadata.created_at,
        location: batch
            .farm_location
            .clone()
            .or_else(|| batch.city.clone())
            .unwrap_or_default(),
        notes,
    }
}

fn custody_step(
    batch: &Batch,
    events: &[SupplyChainEvent],
    stage_status: BatchStatus,
    stage: ChainStage,
    role: ActorRole,
    default_location: &str,
) -> JourneyStep {
    let event = transition_event(events, stage_status);
    JourneyStep {
        stage,
        actor_name: event
            .map(|e| e.actor_name.clone())
            .unwrap_or_else(|| role.display_name().to_string()),
        actor_role: role.code().to_string(),
        status: stage_status,
        price: batch.current_price,
        timestamp: event
            .map(|e| e.timestamp)
            .unwrap_or(batch.base.metadata.updated_at),
        location: event
            .map(|e| e.location.clone())
            .unwrap_or_else(|| default_location.to_string()),
        notes: event
            .and_then(|e| e.condition_note.clone())
            .unwrap_or_default(),
    }
}

fn consumer_step(batch: &Batch, events: &[SupplyChainEvent]) -> JourneyStep {
    let event = transition_event(events, BatchStatus::Sold);
    JourneyStep {
        stage: ChainStage::Consumer,
        actor_name: batch.current_owner_name.clone(),
        actor_role: ActorRole::Consumer.code().to_string(),
        status: BatchStatus::Sold,
        price: batch.current_price,
        timestamp: event
            .map(|e| e.timestamp)
            .unwrap_or(batch.base.metadata.updated_at),
        location: event
            .map(|e| e.location.clone())
            .unwrap_or_else(|| "point of sale".to_string()),
        notes: event
            .and_then(|e| e.condition_note.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use contracts::domain::a001_batch::aggregate::BatchDto;
    use contracts::enums::EventType;
    use uuid::Uuid;

    fn sample_batch(status: BatchStatus) -> Batch {
        let dto = BatchDto {
            description: "Alphonso mangoes".into(),
            category: "Fruit".into(),
            quantity: 100.0,
            unit: "kg".into(),
            origin_price: 2.5,
            farm_location: Some("Ratnagiri farm".into()),
            ..Default::default()
        };
        let mut batch = Batch::new_for_insert(dto, Uuid::new_v4(), "Green Valley".into());
        batch.status = status;
        batch
    }

    fn event_for(
        batch: &Batch,
        status: BatchStatus,
        actor: &str,
        at: DateTime<Utc>,
    ) -> SupplyChainEvent {
        let mut event = SupplyChainEvent::new(
            batch.base.id.value(),
            EventType::StatusUpdate,
            actor.into(),
            Some(Uuid::new_v4()),
            "somewhere".into(),
            "transition".into(),
        )
        .with_status(status);
        event.timestamp = at;
        event
    }

    #[test]
    fn registered_batch_has_single_producer_step() {
        let batch = sample_batch(BatchStatus::Registered);
        let journey = reconstruct(&batch, &[], Utc::now());
        assert_eq!(journey.stage_count, 1);
        assert_eq!(journey.steps[0].stage, ChainStage::Producer);
        assert_eq!(journey.steps[0].actor_name, "Green Valley");
        assert_eq!(journey.steps[0].price, 2.5);
        assert_eq!(journey.current_stage, ChainStage::Producer);
        assert!(journey.days_in_chain >= 0);
    }

    #[test]
    fn sold_batch_yields_all_four_stages_with_event_timestamps() {
        let mut batch = sample_batch(BatchStatus::Sold);
        batch.current_price = 6.0;
        batch.current_owner_name = "Jane Doe".into();

        let t0 = batch.base.metadata.created_at;
        let events = vec![
            // newest first, the repository ordering
            event_for(&batch, BatchStatus::Sold, "Corner Grocer", t0 + Duration::days(9)),
            event_for(&batch, BatchStatus::WithRetailer, "Corner Grocer", t0 + Duration::days(7)),
            event_for(&batch, BatchStatus::WithDistributor, "FreshLine", t0 + Duration::days(3)),
        ];
        batch.base.metadata.updated_at = t0 + Duration::days(9);

        let journey = reconstruct(&batch, &events, Utc::now());
        assert_eq!(journey.stage_count, 4);
        assert_eq!(journey.steps[1].actor_name, "FreshLine");
        assert_eq!(journey.steps[1].timestamp, t0 + Duration::days(3));
        assert_eq!(journey.steps[2].actor_name, "Corner Grocer");
        assert_eq!(journey.steps[3].actor_name, "Jane Doe");
        assert_eq!(journey.current_stage, ChainStage::Consumer);
        assert_eq!(journey.days_in_chain, 9);
    }

    #[test]
    fn missing_events_fall_back_to_batch_timestamps() {
        let batch = sample_batch(BatchStatus::WithDistributor);
        let journey = reconstruct(&batch, &[], Utc::now());
        assert_eq!(journey.stage_count, 2);
        assert_eq!(journey.steps[1].timestamp, batch.base.metadata.updated_at);
        assert_eq!(journey.steps[1].actor_name, "Distributor");
    }

    #[test]
    fn expired_batch_shows_only_the_producer_stage() {
        // recorded custody events do not add stages the status does not imply
        let batch = sample_batch(BatchStatus::Expired);
        let events = vec![event_for(
            &batch,
            BatchStatus::WithDistributor,
            "FreshLine",
            batch.base.metadata.created_at + Duration::days(1),
        )];
        let journey = reconstruct(&batch, &events, Utc::now());
        assert_eq!(journey.stage_count, 1);
        assert_eq!(journey.current_stage, ChainStage::Producer);
        assert_eq!(journey.steps[0].status, BatchStatus::Expired);
    }

    #[test]
    fn days_in_chain_measures_creation_to_last_update() {
        let mut batch = sample_batch(BatchStatus::WithDistributor);
        let t0 = batch.base.metadata.created_at;
        batch.base.metadata.updated_at = t0 + Duration::days(3);
        let journey = reconstruct(&batch, &[], t0 + Duration::days(10));
        assert_eq!(journey.days_in_chain, 3);
    }

    #[test]
    fn never_updated_batch_is_measured_to_now() {
        let batch = sample_batch(BatchStatus::Registered);
        let now = batch.base.metadata.created_at + Duration::days(2);
        let journey = reconstruct(&batch, &[], now);
        assert_eq!(journey.days_in_chain, 2);
    }

    #[test]
    fn reconstruction_is_deterministic() {
        let batch = sample_batch(BatchStatus::WithRetailer);
        let events = vec![event_for(
            &batch,
            BatchStatus::WithRetailer,
            "Corner Grocer",
            batch.base.metadata.created_at + Duration::days(2),
        )];
        let now = Utc::now();
        let a = serde_json::to_value(reconstruct(&batch, &events, now)).unwrap();
        let b = serde_json::to_value(reconstruct(&batch, &events, now)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn days_in_chain_never_negative() {
        let mut batch = sample_batch(BatchStatus::Sold);
        // terminal batch whose clock skewed backwards
        batch.base.metadata.updated_at = batch.base.metadata.created_at - Duration::hours(5);
        let journey = reconstruct(&batch, &[], Utc::now());
        assert_eq!(journey.days_in_chain, 0);
    }
}
