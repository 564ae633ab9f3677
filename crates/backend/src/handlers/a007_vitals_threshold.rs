use axum::{extract::Path, Json};
use contracts::domain::a007_vitals_threshold::aggregate::{
    ThresholdId, ThresholdUpdateDto, VitalsThreshold,
};

use crate::domain::a007_vitals_threshold;
use crate::shared::api_error::ApiResult;

/// GET /api/thresholds
pub async fn list_all() -> ApiResult<Json<Vec<VitalsThreshold>>> {
    Ok(Json(a007_vitals_threshold::service::list_or_seed().await?))
}

/// PUT /api/thresholds/:id
pub async fn update(
    Path(id): Path<ThresholdId>,
    Json(dto): Json<ThresholdUpdateDto>,
) -> ApiResult<Json<VitalsThreshold>> {
    Ok(Json(a007_vitals_threshold::service::update(id, dto).await?))
}
