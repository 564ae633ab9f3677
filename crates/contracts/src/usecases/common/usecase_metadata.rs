/// Identification of a UseCase
pub trait UseCaseMetadata {
    /// Index, e.g. "u501"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "seed_master_data"
    fn usecase_name() -> &'static str;

    /// Name shown to operators
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_seed_master_data"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
