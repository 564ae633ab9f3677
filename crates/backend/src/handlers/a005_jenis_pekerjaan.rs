use axum::{extract::Path, Json};
use contracts::domain::a005_jenis_pekerjaan::aggregate::{
    JenisPekerjaan, JenisPekerjaanDto, JenisPekerjaanId,
};
use serde_json::{json, Value};

use crate::domain::a005_jenis_pekerjaan;
use crate::shared::api_error::{ApiError, ApiResult};

/// GET /api/jenis-pekerjaan
pub async fn list_all() -> ApiResult<Json<Vec<JenisPekerjaan>>> {
    Ok(Json(a005_jenis_pekerjaan::service::list_all().await?))
}

/// GET /api/jenis-pekerjaan/:id
pub async fn get_by_id(Path(id): Path<JenisPekerjaanId>) -> ApiResult<Json<JenisPekerjaan>> {
    a005_jenis_pekerjaan::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("jenis pekerjaan", id.0))
}

/// POST /api/jenis-pekerjaan
pub async fn create(Json(dto): Json<JenisPekerjaanDto>) -> ApiResult<Json<JenisPekerjaan>> {
    Ok(Json(a005_jenis_pekerjaan::service::create(dto).await?))
}

/// PUT /api/jenis-pekerjaan/:id
pub async fn update(
    Path(id): Path<JenisPekerjaanId>,
    Json(dto): Json<JenisPekerjaanDto>,
) -> ApiResult<Json<JenisPekerjaan>> {
    Ok(Json(a005_jenis_pekerjaan::service::update(id, dto).await?))
}

/// DELETE /api/jenis-pekerjaan/:id
pub async fn delete(Path(id): Path<JenisPekerjaanId>) -> ApiResult<Json<Value>> {
    a005_jenis_pekerjaan::service::delete(id).await?;
    Ok(Json(json!({ "message": super::DELETED_MESSAGE })))
}
