use contracts::domain::a007_vitals_threshold::aggregate::{
    default_thresholds, ThresholdId, ThresholdUpdateDto, VitalsThreshold,
};
use contracts::domain::a007_vitals_threshold::fitness::ThresholdTable;
use contracts::domain::common::DomainError;

use super::repository;
use crate::shared::logger;

/// Threshold list; an empty table is filled with the defaults first
pub async fn list_or_seed() -> anyhow::Result<Vec<VitalsThreshold>> {
    if repository::count().await? == 0 {
        let defaults = default_thresholds();
        repository::insert_many(&defaults).await?;
        tracing::info!("Seeded {} default vitals thresholds", defaults.len());
        logger::log("threshold", "Nilai ambang batas default dibuat");
    }
    repository::list_all().await
}

/// Threshold table used by the fitness check
pub async fn table() -> anyhow::Result<ThresholdTable> {
    Ok(ThresholdTable::from_thresholds(&list_or_seed().await?))
}

/// Changes min and/or max; a bound left out keeps its value
pub async fn update(id: ThresholdId, dto: ThresholdUpdateDto) -> anyhow::Result<VitalsThreshold> {
    let mut item = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Threshold", id.0))?;

    let min = dto.min.unwrap_or(item.min);
    let max = dto.max.unwrap_or(item.max);
    item.set_range(min, max)?;
    repository::update_range(&item).await?;

    logger::log(
        "threshold",
        &format!("Ambang {} diubah menjadi {} - {} {}", item.key, item.min, item.max, item.unit),
    );
    Ok(item)
}
