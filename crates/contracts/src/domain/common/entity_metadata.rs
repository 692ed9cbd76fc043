use serde::{Deserialize, Serialize};

/// Record lifecycle: soft deletion is kept orthogonal to the business status
/// of the aggregate, so it is an explicit tag rather than a flag folded into
/// the status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    Active,
    Deleted,
}

/// Lifecycle metadata carried by every aggregate instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last mutation timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Active / soft-deleted
    pub state: RecordState,
    /// Version for optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Fresh metadata for a newly created aggregate
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            state: RecordState::Active,
            version: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == RecordState::Active
    }

    /// Refresh the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    pub fn mark_deleted(&mut self) {
        self.state = RecordState::Deleted;
        self.touch();
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metadata_is_active_at_version_zero() {
        let meta = EntityMetadata::new();
        assert!(meta.is_active());
        assert_eq!(meta.version, 0);
        assert_eq!(meta.created_at, meta.updated_at);
    }

    #[test]
    fn mark_deleted_flips_state_and_touches() {
        let mut meta = EntityMetadata::new();
        meta.mark_deleted();
        assert!(!meta.is_active());
        assert!(meta.updated_at >= meta.created_at);
    }
}
