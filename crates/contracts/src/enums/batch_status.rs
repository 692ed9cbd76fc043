use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch.
///
/// The producer segment (`Registered` → `WithProducer`) advances forward
/// only; custody segments are driven by the transfer engine. `Sold` and
/// `Expired` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Registered,
    Harvested,
    QualityChecked,
    WithProducer,
    WithDistributor,
    WithRetailer,
    Sold,
    Expired,
}

impl BatchStatus {
    /// Stable wire/storage code
    pub fn code(&self) -> &'static str {
        match self {
            BatchStatus::Registered => "REGISTERED",
            BatchStatus::Harvested => "HARVESTED",
            BatchStatus::QualityChecked => "QUALITY_CHECKED",
            BatchStatus::WithProducer => "WITH_PRODUCER",
            BatchStatus::WithDistributor => "WITH_DISTRIBUTOR",
            BatchStatus::WithRetailer => "WITH_RETAILER",
            BatchStatus::Sold => "SOLD",
            BatchStatus::Expired => "EXPIRED",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            BatchStatus::Registered => "Registered",
            BatchStatus::Harvested => "Harvested",
            BatchStatus::QualityChecked => "Quality checked",
            BatchStatus::WithProducer => "With producer",
            BatchStatus::WithDistributor => "With distributor",
            BatchStatus::WithRetailer => "With retailer",
            BatchStatus::Sold => "Sold",
            BatchStatus::Expired => "Expired",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "REGISTERED" => Some(BatchStatus::Registered),
            "HARVESTED" => Some(BatchStatus::Harvested),
            "QUALITY_CHECKED" => Some(BatchStatus::QualityChecked),
            "WITH_PRODUCER" => Some(BatchStatus::WithProducer),
            "WITH_DISTRIBUTOR" => Some(BatchStatus::WithDistributor),
            "WITH_RETAILER" => Some(BatchStatus::WithRetailer),
            "SOLD" => Some(BatchStatus::Sold),
            "EXPIRED" => Some(BatchStatus::Expired),
            _ => None,
        }
    }

    pub fn all() -> Vec<BatchStatus> {
        vec![
            BatchStatus::Registered,
            BatchStatus::Harvested,
            BatchStatus::QualityChecked,
            BatchStatus::WithProducer,
            BatchStatus::WithDistributor,
            BatchStatus::WithRetailer,
            BatchStatus::Sold,
            BatchStatus::Expired,
        ]
    }

    /// No transfer operation is legal once a batch reaches a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Sold | BatchStatus::Expired)
    }

    /// Statuses where custody still sits with the originating producer
    pub fn is_producer_segment(&self) -> bool {
        matches!(
            self,
            BatchStatus::Registered
                | BatchStatus::Harvested
                | BatchStatus::QualityChecked
                | BatchStatus::WithProducer
        )
    }

    /// Position within the producer segment, used to forbid backward moves
    pub fn producer_rank(&self) -> Option<u8> {
        match self {
            BatchStatus::Registered => Some(0),
            BatchStatus::Harvested => Some(1),
            BatchStatus::QualityChecked => Some(2),
            BatchStatus::WithProducer => Some(3),
            _ => None,
        }
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for status in BatchStatus::all() {
            assert_eq!(BatchStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(BatchStatus::from_code("WITH_FARMER"), None);
    }

    #[test]
    fn only_sold_and_expired_are_terminal() {
        for status in BatchStatus::all() {
            let expected = matches!(status, BatchStatus::Sold | BatchStatus::Expired);
            assert_eq!(status.is_terminal(), expected, "{status}");
        }
    }

    #[test]
    fn producer_segment_ranks_are_ordered() {
        assert!(
            BatchStatus::Registered.producer_rank() < BatchStatus::Harvested.producer_rank()
        );
        assert!(
            BatchStatus::Harvested.producer_rank() < BatchStatus::QualityChecked.producer_rank()
        );
        assert!(
            BatchStatus::QualityChecked.producer_rank()
                < BatchStatus::WithProducer.producer_rank()
        );
        assert_eq!(BatchStatus::Sold.producer_rank(), None);
    }
}
