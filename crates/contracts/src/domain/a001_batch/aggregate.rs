use crate::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use crate::enums::BatchStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub Uuid);

impl BatchId {
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

impl AggregateId for BatchId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BatchId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// One traceable lot of agricultural product moving through the supply chain.
///
/// `base.code` is the globally unique batch code; `qr_code` is an independent
/// secondary lookup key. Both are immutable after creation. The batch record
/// is the single source of truth for custody: where the event log disagrees,
/// the batch wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    #[serde(flatten)]
    pub base: BaseAggregate<BatchId>,

    // Provenance (immutable once set)
    #[serde(rename = "originatorId")]
    pub originator_id: Uuid,
    #[serde(rename = "originatorName")]
    pub originator_name: String,

    // Custody
    #[serde(rename = "currentOwnerId")]
    pub current_owner_id: Uuid,
    #[serde(rename = "currentOwnerName")]
    pub current_owner_name: String,

    pub status: BatchStatus,

    // Lot contents
    pub category: String,
    pub variety: Option<String>,
    pub quantity: f64,
    pub unit: String,
    #[serde(rename = "harvestDate")]
    pub harvest_date: Option<chrono::NaiveDate>,

    // Pricing
    #[serde(rename = "originPrice")]
    pub origin_price: f64,
    #[serde(rename = "currentPrice")]
    pub current_price: f64,

    // Traceability lookup key (immutable)
    #[serde(rename = "qrCode")]
    pub qr_code: String,

    // Origin location, shown on the public journey
    #[serde(rename = "farmLocation")]
    pub farm_location: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl Batch {
    /// Create a new batch for insertion: REGISTERED, owned by its originator,
    /// with generated batch and QR codes.
    pub fn new_for_insert(dto: BatchDto, originator_id: Uuid, originator_name: String) -> Self {
        let mut base = BaseAggregate::new(
            BatchId::new_v4(),
            generate_batch_code(),
            dto.description,
        );
        base.comment = dto.comment;

        Self {
            base,
            originator_id,
            originator_name: originator_name.clone(),
            current_owner_id: originator_id,
            current_owner_name: originator_name,
            status: BatchStatus::Registered,
            category: dto.category,
            variety: dto.variety,
            quantity: dto.quantity,
            unit: dto.unit,
            harvest_date: dto.harvest_date,
            origin_price: dto.origin_price,
            current_price: dto.origin_price,
            qr_code: generate_qr_code(),
            farm_location: dto.farm_location,
            city: dto.city,
            region: dto.region,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn is_active(&self) -> bool {
        self.base.metadata.is_active()
    }

    /// Apply the non-None fields of a partial update
    pub fn apply_update(&mut self, dto: &BatchUpdateDto) {
        if let Some(ref description) = dto.description {
            self.base.description = description.clone();
        }
        if let Some(ref category) = dto.category {
            self.category = category.clone();
        }
        if dto.variety.is_some() {
            self.variety = dto.variety.clone();
        }
        if let Some(quantity) = dto.quantity {
            self.quantity = quantity;
        }
        if let Some(ref unit) = dto.unit {
            self.unit = unit.clone();
        }
        if let Some(harvest_date) = dto.harvest_date {
            self.harvest_date = Some(harvest_date);
        }
        if let Some(origin_price) = dto.origin_price {
            // Producer-side price edits reset the asking price as well
            self.origin_price = origin_price;
            self.current_price = origin_price;
        }
        if dto.farm_location.is_some() {
            self.farm_location = dto.farm_location.clone();
        }
        if dto.city.is_some() {
            self.city = dto.city.clone();
        }
        if dto.region.is_some() {
            self.region = dto.region.clone();
        }
        if dto.comment.is_some() {
            self.base.comment = dto.comment.clone();
        }
    }

    /// Structural validation beyond shape-checking done at the boundary
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Batch description cannot be empty".into());
        }
        if self.category.trim().is_empty() {
            return Err("Category cannot be empty".into());
        }
        if self.unit.trim().is_empty() {
            return Err("Unit cannot be empty".into());
        }
        if !(self.quantity > 0.0) {
            return Err("Quantity must be greater than zero".into());
        }
        if self.origin_price < 0.0 || self.current_price < 0.0 {
            return Err("Prices cannot be negative".into());
        }
        Ok(())
    }

    /// Whole days the batch has spent in the chain: creation to last update.
    /// A record that was never written back is measured to `now`.
    pub fn days_in_chain(&self, now: chrono::DateTime<chrono::Utc>) -> i64 {
        let meta = &self.base.metadata;
        let end = if meta.updated_at > meta.created_at {
            meta.updated_at
        } else {
            now
        };
        (end - meta.created_at).num_days().max(0)
    }

    /// Hook before every write: refresh the update timestamp
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

// ============================================================================
// Code generation
// ============================================================================

/// Globally unique batch code: `BATCH-<epoch-millis>-<8-char-hex>`
pub fn generate_batch_code() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("BATCH-{}-{}", millis, suffix)
}

/// Unique traceability lookup key, independent of the batch code
pub fn generate_qr_code() -> String {
    format!("QR-{}", Uuid::new_v4().to_string().to_uppercase())
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for registering a new batch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchDto {
    /// Product name
    pub description: String,
    pub category: String,
    pub variety: Option<String>,
    pub quantity: f64,
    pub unit: String,
    #[serde(rename = "harvestDate")]
    pub harvest_date: Option<chrono::NaiveDate>,
    #[serde(rename = "originPrice")]
    pub origin_price: f64,
    #[serde(rename = "farmLocation")]
    pub farm_location: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub comment: Option<String>,
}

/// DTO for a partial batch update; only non-None fields are applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchUpdateDto {
    pub description: Option<String>,
    pub category: Option<String>,
    pub variety: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    #[serde(rename = "harvestDate")]
    pub harvest_date: Option<chrono::NaiveDate>,
    #[serde(rename = "originPrice")]
    pub origin_price: Option<f64>,
    #[serde(rename = "farmLocation")]
    pub farm_location: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub comment: Option<String>,
}

/// DTO for custody transfer requests (distributor/retailer initiated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDto {
    #[serde(rename = "requestedQuantity")]
    pub requested_quantity: f64,
    pub price: f64,
    pub notes: Option<String>,
}

/// DTO for a distributor-initiated transfer to a named retailer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerTransferDto {
    #[serde(rename = "retailerId")]
    pub retailer_id: Uuid,
    pub quantity: f64,
    pub price: f64,
    pub notes: Option<String>,
}

/// DTO for a price update by the current owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdateDto {
    pub price: f64,
}

/// DTO for recording a sale by the retailer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDto {
    #[serde(rename = "soldQuantity")]
    pub sold_quantity: f64,
    #[serde(rename = "finalPrice")]
    pub final_price: f64,
    #[serde(rename = "buyerId")]
    pub buyer_id: Option<Uuid>,
    #[serde(rename = "buyerName")]
    pub buyer_name: Option<String>,
    pub notes: Option<String>,
}

/// DTO for a producer-side status advance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateDto {
    pub status: BatchStatus,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dto() -> BatchDto {
        BatchDto {
            description: "Alphonso mangoes".into(),
            category: "Fruit".into(),
            variety: Some("Alphonso".into()),
            quantity: 100.0,
            unit: "kg".into(),
            harvest_date: None,
            origin_price: 2.5,
            farm_location: Some("Ratnagiri farm".into()),
            city: Some("Ratnagiri".into()),
            region: Some("Maharashtra".into()),
            comment: None,
        }
    }

    #[test]
    fn new_batch_starts_registered_and_owned_by_originator() {
        let producer = Uuid::new_v4();
        let batch = Batch::new_for_insert(sample_dto(), producer, "Green Valley".into());
        assert_eq!(batch.status, BatchStatus::Registered);
        assert_eq!(batch.originator_id, producer);
        assert_eq!(batch.current_owner_id, producer);
        assert_eq!(batch.origin_price, batch.current_price);
        assert!(batch.is_active());
        assert!(batch.validate().is_ok());
    }

    #[test]
    fn batch_code_has_expected_shape() {
        let code = generate_batch_code();
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "BATCH");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_codes_are_unique() {
        let a = generate_qr_code();
        let b = generate_qr_code();
        assert_ne!(a, b);
        assert!(a.starts_with("QR-"));
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let producer = Uuid::new_v4();
        let mut dto = sample_dto();
        dto.quantity = 0.0;
        let batch = Batch::new_for_insert(dto, producer, "Green Valley".into());
        assert!(batch.validate().is_err());
    }

    #[test]
    fn days_in_chain_runs_from_creation_to_last_update() {
        let producer = Uuid::new_v4();
        let mut batch = Batch::new_for_insert(sample_dto(), producer, "Green Valley".into());
        let t0 = batch.base.metadata.created_at;
        let now = t0 + chrono::Duration::days(10);

        // never written back: measured to now
        assert_eq!(batch.days_in_chain(now), 10);

        batch.base.metadata.updated_at = t0 + chrono::Duration::days(3);
        assert_eq!(batch.days_in_chain(now), 3);

        // skewed clock never yields a negative span
        batch.base.metadata.updated_at = t0 - chrono::Duration::hours(5);
        assert_eq!(batch.days_in_chain(now), 10);
    }

    #[test]
    fn partial_update_touches_only_provided_fields() {
        let producer = Uuid::new_v4();
        let mut batch = Batch::new_for_insert(sample_dto(), producer, "Green Valley".into());
        let update = BatchUpdateDto {
            origin_price: Some(3.0),
            ..Default::default()
        };
        batch.apply_update(&update);
        assert_eq!(batch.origin_price, 3.0);
        assert_eq!(batch.current_price, 3.0);
        assert_eq!(batch.category, "Fruit");
        assert_eq!(batch.quantity, 100.0);
    }
}
