use crate::domain::a001_batch::aggregate::Batch;
use serde::{Deserialize, Serialize};

/// Producer dashboard: batches the actor originated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerDashboard {
    #[serde(rename = "totalBatches")]
    pub total_batches: usize,
    #[serde(rename = "activeBatches")]
    pub active_batches: usize,
    #[serde(rename = "soldBatches")]
    pub sold_batches: usize,
    #[serde(rename = "recentBatches")]
    pub recent_batches: Vec<Batch>,
}

/// Distributor dashboard: batches in the actor's custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributorDashboard {
    #[serde(rename = "totalBatches")]
    pub total_batches: usize,
    #[serde(rename = "activeBatches")]
    pub active_batches: usize,
    #[serde(rename = "inCustody")]
    pub in_custody: usize,
    #[serde(rename = "recentBatches")]
    pub recent_batches: Vec<Batch>,
}

/// Retailer dashboard: custody counts plus realized revenue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerDashboard {
    #[serde(rename = "totalBatches")]
    pub total_batches: usize,
    #[serde(rename = "activeBatches")]
    pub active_batches: usize,
    #[serde(rename = "withRetailer")]
    pub with_retailer: usize,
    #[serde(rename = "soldBatches")]
    pub sold_batches: usize,
    pub revenue: f64,
    #[serde(rename = "recentBatches")]
    pub recent_batches: Vec<Batch>,
}

/// System-wide statistics for the administrative overview
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SystemStats {
    #[serde(rename = "totalBatches")]
    pub total_batches: usize,
    #[serde(rename = "activeBatches")]
    pub active_batches: usize,
    #[serde(rename = "byStatus")]
    pub by_status: Vec<StatusCount>,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
    #[serde(rename = "averageDaysInChain")]
    pub average_days_in_chain: f64,
    #[serde(rename = "averageMarkupPercent")]
    pub average_markup_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}
