use chrono::{DateTime, Utc};
use contracts::domain::common::EntityMetadata;

/// Metadata of a row read back from one of the aggregate tables
pub fn from_columns(
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    version: i32,
) -> EntityMetadata {
    EntityMetadata {
        created_at: created_at.unwrap_or_else(Utc::now),
        updated_at: updated_at.unwrap_or_else(Utc::now),
        is_deleted,
        version,
    }
}
