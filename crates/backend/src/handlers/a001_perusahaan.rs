use axum::{extract::Path, Json};
use contracts::domain::a001_perusahaan::aggregate::{
    Perusahaan, PerusahaanDto, PerusahaanId, PerusahaanListItem,
};
use serde_json::{json, Value};

use crate::domain::a001_perusahaan;
use crate::shared::api_error::{ApiError, ApiResult};

/// GET /api/perusahaan
pub async fn list_all() -> ApiResult<Json<Vec<PerusahaanListItem>>> {
    Ok(Json(a001_perusahaan::service::list_all().await?))
}

/// GET /api/perusahaan/:id
pub async fn get_by_id(Path(id): Path<PerusahaanId>) -> ApiResult<Json<Perusahaan>> {
    a001_perusahaan::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("perusahaan", id.0))
}

/// POST /api/perusahaan
pub async fn create(Json(dto): Json<PerusahaanDto>) -> ApiResult<Json<Perusahaan>> {
    Ok(Json(a001_perusahaan::service::create(dto).await?))
}

/// PUT /api/perusahaan/:id
pub async fn update(
    Path(id): Path<PerusahaanId>,
    Json(dto): Json<PerusahaanDto>,
) -> ApiResult<Json<Perusahaan>> {
    Ok(Json(a001_perusahaan::service::update(id, dto).await?))
}

/// DELETE /api/perusahaan/:id
pub async fn delete(Path(id): Path<PerusahaanId>) -> ApiResult<Json<Value>> {
    a001_perusahaan::service::delete(id).await?;
    Ok(Json(json!({ "message": super::DELETED_MESSAGE })))
}
