use chrono::Utc;
use contracts::domain::a001_batch::aggregate::{Batch, BatchId};
use contracts::domain::common::{BaseAggregate, EntityMetadata, RecordState};
use contracts::enums::BatchStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_batch")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub originator_id: String,
    pub originator_name: String,
    pub current_owner_id: String,
    pub current_owner_name: String,
    pub status: String,
    pub category: String,
    pub variety: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub harvest_date: Option<chrono::NaiveDate>,
    pub origin_price: f64,
    pub current_price: f64,
    pub qr_code: String,
    pub farm_location: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Batch {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            state: if m.is_deleted {
                RecordState::Deleted
            } else {
                RecordState::Active
            },
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Batch {
            base: BaseAggregate::with_metadata(
                BatchId::new(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            originator_id: Uuid::parse_str(&m.originator_id).unwrap_or_default(),
            originator_name: m.originator_name,
            current_owner_id: Uuid::parse_str(&m.current_owner_id).unwrap_or_default(),
            current_owner_name: m.current_owner_name,
            status: BatchStatus::from_code(&m.status).unwrap_or(BatchStatus::Registered),
            category: m.category,
            variety: m.variety,
            quantity: m.quantity,
            unit: m.unit,
            harvest_date: m.harvest_date,
            origin_price: m.origin_price,
            current_price: m.current_price,
            qr_code: m.qr_code,
            farm_location: m.farm_location,
            city: m.city,
            region: m.region,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Batch>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<Batch>> {
    let result = Entity::find()
        .filter(Column::Code.eq(code))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Traceability lookup; resolves soft-deleted batches as well
pub async fn get_by_qr_code(qr_code: &str) -> anyhow::Result<Option<Batch>> {
    let result = Entity::find()
        .filter(Column::QrCode.eq(qr_code))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Batch) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        originator_id: Set(aggregate.originator_id.to_string()),
        originator_name: Set(aggregate.originator_name.clone()),
        current_owner_id: Set(aggregate.current_owner_id.to_string()),
        current_owner_name: Set(aggregate.current_owner_name.clone()),
        status: Set(aggregate.status.code().to_string()),
        category: Set(aggregate.category.clone()),
        variety: Set(aggregate.variety.clone()),
        quantity: Set(aggregate.quantity),
        unit: Set(aggregate.unit.clone()),
        harvest_date: Set(aggregate.harvest_date),
        origin_price: Set(aggregate.origin_price),
        current_price: Set(aggregate.current_price),
        qr_code: Set(aggregate.qr_code.clone()),
        farm_location: Set(aggregate.farm_location.clone()),
        city: Set(aggregate.city.clone()),
        region: Set(aggregate.region.clone()),
        is_deleted: Set(!aggregate.base.metadata.is_active()),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Write the aggregate back iff the stored version still equals
/// `expected_version`. Returns false when a concurrent writer advanced the
/// record first — every read-modify-write transition goes through here.
pub async fn update_guarded(aggregate: &Batch, expected_version: i32) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;

    let result = Entity::update_many()
        .col_expr(
            Column::Description,
            Expr::value(aggregate.base.description.clone()),
        )
        .col_expr(Column::Comment, Expr::value(aggregate.base.comment.clone()))
        .col_expr(
            Column::CurrentOwnerId,
            Expr::value(aggregate.current_owner_id.to_string()),
        )
        .col_expr(
            Column::CurrentOwnerName,
            Expr::value(aggregate.current_owner_name.clone()),
        )
        .col_expr(Column::Status, Expr::value(aggregate.status.code()))
        .col_expr(Column::Category, Expr::value(aggregate.category.clone()))
        .col_expr(Column::Variety, Expr::value(aggregate.variety.clone()))
        .col_expr(Column::Quantity, Expr::value(aggregate.quantity))
        .col_expr(Column::Unit, Expr::value(aggregate.unit.clone()))
        .col_expr(Column::HarvestDate, Expr::value(aggregate.harvest_date))
        .col_expr(Column::OriginPrice, Expr::value(aggregate.origin_price))
        .col_expr(Column::CurrentPrice, Expr::value(aggregate.current_price))
        .col_expr(
            Column::FarmLocation,
            Expr::value(aggregate.farm_location.clone()),
        )
        .col_expr(Column::City, Expr::value(aggregate.city.clone()))
        .col_expr(Column::Region, Expr::value(aggregate.region.clone()))
        .col_expr(
            Column::IsDeleted,
            Expr::value(!aggregate.base.metadata.is_active()),
        )
        .col_expr(
            Column::UpdatedAt,
            Expr::value(aggregate.base.metadata.updated_at),
        )
        .col_expr(
            Column::Version,
            Expr::value(aggregate.base.metadata.version),
        )
        .filter(Column::Id.eq(aggregate.to_string_id()))
        .filter(Column::Version.eq(expected_version))
        .exec(conn())
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn hard_delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

pub async fn list_by_originator(originator_id: Uuid, active_only: bool) -> anyhow::Result<Vec<Batch>> {
    let mut query = Entity::find().filter(Column::OriginatorId.eq(originator_id.to_string()));
    if active_only {
        query = query.filter(Column::IsDeleted.eq(false));
    }
    let items = query
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_owner(owner_id: Uuid, active_only: bool) -> anyhow::Result<Vec<Batch>> {
    let mut query = Entity::find().filter(Column::CurrentOwnerId.eq(owner_id.to_string()));
    if active_only {
        query = query.filter(Column::IsDeleted.eq(false));
    }
    let items = query
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_statuses(statuses: &[BatchStatus]) -> anyhow::Result<Vec<Batch>> {
    let codes: Vec<String> = statuses.iter().map(|s| s.code().to_string()).collect();
    let items = Entity::find()
        .filter(Column::Status.is_in(codes))
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_active() -> anyhow::Result<Vec<Batch>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Administrative listing: includes soft-deleted records
pub async fn list_all() -> anyhow::Result<Vec<Batch>> {
    let items = Entity::find()
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
