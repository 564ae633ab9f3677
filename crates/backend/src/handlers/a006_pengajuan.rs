use axum::{extract::Path, Json};
use contracts::domain::a006_pengajuan::aggregate::{
    EvaluateRequest, PengajuanDto, PengajuanId, PengajuanView,
};
use contracts::domain::a007_vitals_threshold::fitness::TeamEvaluation;
use serde_json::{json, Value};

use crate::domain::a006_pengajuan;
use crate::shared::api_error::{ApiError, ApiResult};

/// GET /api/pengajuan
pub async fn list_all() -> ApiResult<Json<Vec<PengajuanView>>> {
    Ok(Json(a006_pengajuan::service::list_all().await?))
}

/// GET /api/pengajuan/:id
pub async fn get_by_id(Path(id): Path<PengajuanId>) -> ApiResult<Json<PengajuanView>> {
    a006_pengajuan::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("pengajuan", id.0))
}

/// POST /api/pengajuan
pub async fn create(Json(dto): Json<PengajuanDto>) -> ApiResult<Json<PengajuanView>> {
    Ok(Json(a006_pengajuan::service::create(dto).await?))
}

/// PUT /api/pengajuan/:id
pub async fn update(
    Path(id): Path<PengajuanId>,
    Json(dto): Json<PengajuanDto>,
) -> ApiResult<Json<PengajuanView>> {
    Ok(Json(a006_pengajuan::service::update(id, dto).await?))
}

/// POST /api/pengajuan/:id/evaluate
///
/// Body is optional; without `anggotaTim` the stored team is evaluated.
pub async fn evaluate(
    Path(id): Path<PengajuanId>,
    body: Option<Json<EvaluateRequest>>,
) -> ApiResult<Json<TeamEvaluation>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(a006_pengajuan::service::evaluate(id, request).await?))
}

/// DELETE /api/pengajuan/:id
pub async fn delete(Path(id): Path<PengajuanId>) -> ApiResult<Json<Value>> {
    a006_pengajuan::service::delete(id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}
