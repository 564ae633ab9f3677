use super::EntityMetadata;

/// Root of an aggregate.
///
/// Carries the per-record accessors and the static naming used for tables,
/// log messages and error texts.
pub trait AggregateRoot {
    /// Id type of the aggregate
    type Id;

    // ============================================================================
    // Instance data
    // ============================================================================

    fn id(&self) -> Self::Id;

    /// Business code of the record (kode, NRP, permit number)
    fn code(&self) -> &str;

    /// Display name of the record
    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Static data of the aggregate class
    // ============================================================================

    /// Aggregate index, e.g. "a001"
    fn aggregate_index() -> &'static str;

    /// Collection name, e.g. "perusahaan"
    fn collection_name() -> &'static str;

    /// Singular name for messages, e.g. "Perusahaan"
    fn element_name() -> &'static str;

    /// Plural name for messages, e.g. "Daftar Perusahaan"
    fn list_name() -> &'static str;

    /// Full name, e.g. "a001_perusahaan"; also the table name
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
