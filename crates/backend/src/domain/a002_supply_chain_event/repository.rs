use contracts::domain::a002_supply_chain_event::aggregate::{EventId, SupplyChainEvent};
use contracts::enums::{BatchStatus, EventType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_supply_chain_event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub batch_id: String,
    pub event_type: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub actor_name: String,
    pub actor_id: Option<String>,
    pub location: String,
    pub description: String,
    pub condition_note: Option<String>,
    pub status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplyChainEvent {
    fn from(m: Model) -> Self {
        SupplyChainEvent {
            id: EventId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            batch_id: Uuid::parse_str(&m.batch_id).unwrap_or_default(),
            event_type: EventType::from_code(&m.event_type).unwrap_or(EventType::StatusUpdate),
            timestamp: m.timestamp,
            actor_name: m.actor_name,
            actor_id: m.actor_id.and_then(|s| Uuid::parse_str(&s).ok()),
            location: m.location,
            description: m.description,
            condition_note: m.condition_note,
            status: m.status.as_deref().and_then(BatchStatus::from_code),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn insert(event: &SupplyChainEvent) -> anyhow::Result<Uuid> {
    let uuid = event.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        batch_id: Set(event.batch_id.to_string()),
        event_type: Set(event.event_type.code().to_string()),
        timestamp: Set(event.timestamp),
        actor_name: Set(event.actor_name.clone()),
        actor_id: Set(event.actor_id.map(|id| id.to_string())),
        location: Set(event.location.clone()),
        description: Set(event.description.clone()),
        condition_note: Set(event.condition_note.clone()),
        status: Set(event.status.map(|s| s.code().to_string())),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// All events of one batch, newest first
pub async fn list_by_batch(batch_id: Uuid) -> anyhow::Result<Vec<SupplyChainEvent>> {
    let items = Entity::find()
        .filter(Column::BatchId.eq(batch_id.to_string()))
        .order_by_desc(Column::Timestamp)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn delete_by_batch(batch_id: Uuid) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::BatchId.eq(batch_id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}
