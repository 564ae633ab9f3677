use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a003_jabatan::aggregate::{
    JabatanDto, JabatanId, JabatanListItem, JabatanQuery,
};
use serde_json::{json, Value};

use crate::domain::a003_jabatan;
use crate::shared::api_error::{ApiError, ApiResult};

/// GET /api/jabatan?departemenId=
pub async fn list(Query(query): Query<JabatanQuery>) -> ApiResult<Json<Vec<JabatanListItem>>> {
    Ok(Json(a003_jabatan::service::list(&query).await?))
}

/// GET /api/jabatan/:id
pub async fn get_by_id(Path(id): Path<JabatanId>) -> ApiResult<Json<JabatanListItem>> {
    a003_jabatan::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("jabatan", id.0))
}

/// POST /api/jabatan
pub async fn create(Json(dto): Json<JabatanDto>) -> ApiResult<Json<JabatanListItem>> {
    Ok(Json(a003_jabatan::service::create(dto).await?))
}

/// PUT /api/jabatan/:id
pub async fn update(
    Path(id): Path<JabatanId>,
    Json(dto): Json<JabatanDto>,
) -> ApiResult<Json<JabatanListItem>> {
    Ok(Json(a003_jabatan::service::update(id, dto).await?))
}

/// DELETE /api/jabatan/:id
pub async fn delete(Path(id): Path<JabatanId>) -> ApiResult<Json<Value>> {
    a003_jabatan::service::delete(id).await?;
    Ok(Json(json!({ "message": super::DELETED_MESSAGE })))
}
