use crate::domain::common::AggregateId;
use crate::enums::{BatchStatus, EventType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a supply-chain event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for EventId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EventId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Record
// ============================================================================

/// One entry of a batch's append-only audit trail.
///
/// Written by the transfer engine as a side effect of transitions; never
/// mutated or deleted afterwards. Carries no authority of its own — the batch
/// record wins on disagreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyChainEvent {
    pub id: EventId,
    #[serde(rename = "batchId")]
    pub batch_id: Uuid,
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "actorName")]
    pub actor_name: String,
    #[serde(rename = "actorId")]
    pub actor_id: Option<Uuid>,
    pub location: String,
    pub description: String,
    #[serde(rename = "conditionNote")]
    pub condition_note: Option<String>,
    /// Post-transition batch status, when the event marks a transition.
    /// Lets the journey reconstruction use exact stage timestamps instead of
    /// approximating from the batch's single `updated_at`.
    pub status: Option<BatchStatus>,
}

impl SupplyChainEvent {
    pub fn new(
        batch_id: Uuid,
        event_type: EventType,
        actor_name: String,
        actor_id: Option<Uuid>,
        location: String,
        description: String,
    ) -> Self {
        Self {
            id: EventId::new_v4(),
            batch_id,
            event_type,
            timestamp: chrono::Utc::now(),
            actor_name,
            actor_id,
            location,
            description,
            condition_note: None,
            status: None,
        }
    }

    pub fn with_status(mut self, status: BatchStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition_note = Some(condition.into());
        self
    }
}
