pub mod response;

pub use response::SeedSummary;

use crate::usecases::common::UseCaseMetadata;

pub struct SeedMasterData;

impl UseCaseMetadata for SeedMasterData {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "seed_master_data"
    }

    fn display_name() -> &'static str {
        "Isi data master contoh"
    }

    fn description() -> &'static str {
        "Companies, departments, positions, employees and high-risk job types, upserted by code"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_index_and_name() {
        assert_eq!(SeedMasterData::full_name(), "u501_seed_master_data");
    }
}
