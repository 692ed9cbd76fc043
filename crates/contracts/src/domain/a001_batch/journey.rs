use crate::enums::BatchStatus;
use serde::{Deserialize, Serialize};

use super::aggregate::Batch;

/// Human-facing stage of the chain, derived from the batch status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainStage {
    Producer,
    Distributor,
    Retailer,
    Consumer,
}

impl ChainStage {
    pub fn label(&self) -> &'static str {
        match self {
            ChainStage::Producer => "PRODUCER",
            ChainStage::Distributor => "DISTRIBUTOR",
            ChainStage::Retailer => "RETAILER",
            ChainStage::Consumer => "CONSUMER",
        }
    }

    /// Stage a batch currently sits in, given its status
    pub fn from_status(status: BatchStatus) -> ChainStage {
        match status {
            BatchStatus::Registered
            | BatchStatus::Harvested
            | BatchStatus::QualityChecked
            | BatchStatus::WithProducer
            | BatchStatus::Expired => ChainStage::Producer,
            BatchStatus::WithDistributor => ChainStage::Distributor,
            BatchStatus::WithRetailer => ChainStage::Retailer,
            BatchStatus::Sold => ChainStage::Consumer,
        }
    }
}

/// One step of the reconstructed provenance timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyStep {
    pub stage: ChainStage,
    #[serde(rename = "actorName")]
    pub actor_name: String,
    #[serde(rename = "actorRole")]
    pub actor_role: String,
    pub status: BatchStatus,
    pub price: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub location: String,
    pub notes: String,
}

/// Complete provenance answer for public lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJourney {
    pub batch: Batch,
    pub steps: Vec<JourneyStep>,
    #[serde(rename = "stageCount")]
    pub stage_count: usize,
    #[serde(rename = "daysInChain")]
    pub days_in_chain: i64,
    #[serde(rename = "currentStage")]
    pub current_stage: ChainStage,
    #[serde(rename = "batchCode")]
    pub batch_code: String,
    #[serde(rename = "qrCode")]
    pub qr_code: String,
}
