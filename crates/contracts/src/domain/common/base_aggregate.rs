use serde::{Deserialize, Serialize};

use super::EntityMetadata;

/// Fields every aggregate shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    pub id: Id,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            metadata: EntityMetadata::new(),
        }
    }

    /// Aggregate loaded from the database
    pub fn with_metadata(id: Id, metadata: EntityMetadata) -> Self {
        Self { id, metadata }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
