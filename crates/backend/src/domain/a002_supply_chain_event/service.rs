use contracts::domain::a002_supply_chain_event::aggregate::SupplyChainEvent;
use uuid::Uuid;

use super::repository;

/// Append one entry to the audit trail. Callers treat failures as
/// non-fatal; the batch record remains the source of truth.
pub async fn append(event: SupplyChainEvent) -> anyhow::Result<Uuid> {
    repository::insert(&event).await
}

/// Full trail of a batch, newest first
pub async fn list_for_batch(batch_id: Uuid) -> anyhow::Result<Vec<SupplyChainEvent>> {
    repository::list_by_batch(batch_id).await
}

/// Remove the trail together with a purged batch
pub async fn purge_for_batch(batch_id: Uuid) -> anyhow::Result<u64> {
    repository::delete_by_batch(batch_id).await
}
