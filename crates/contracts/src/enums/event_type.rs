use serde::{Deserialize, Serialize};

/// Fixed vocabulary of supply-chain event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Harvest,
    QualityCheck,
    StatusUpdate,
    Transit,
    Delivery,
}

impl EventType {
    /// Stable wire/storage code (matches the legacy free-form vocabulary)
    pub fn code(&self) -> &'static str {
        match self {
            EventType::Harvest => "Harvest",
            EventType::QualityCheck => "Quality Check",
            EventType::StatusUpdate => "Status Update",
            EventType::Transit => "Transit",
            EventType::Delivery => "Delivery",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Harvest" => Some(EventType::Harvest),
            "Quality Check" => Some(EventType::QualityCheck),
            "Status Update" => Some(EventType::StatusUpdate),
            "Transit" => Some(EventType::Transit),
            "Delivery" => Some(EventType::Delivery),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
