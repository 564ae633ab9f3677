use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a002_departemen::aggregate::{
    DepartemenDto, DepartemenId, DepartemenListItem, DepartemenQuery,
};
use serde_json::{json, Value};

use crate::domain::a002_departemen;
use crate::shared::api_error::{ApiError, ApiResult};

/// GET /api/departemen?perusahaanId=
pub async fn list(
    Query(query): Query<DepartemenQuery>,
) -> ApiResult<Json<Vec<DepartemenListItem>>> {
    Ok(Json(a002_departemen::service::list(&query).await?))
}

/// GET /api/departemen/:id
pub async fn get_by_id(Path(id): Path<DepartemenId>) -> ApiResult<Json<DepartemenListItem>> {
    a002_departemen::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("departemen", id.0))
}

/// POST /api/departemen
pub async fn create(Json(dto): Json<DepartemenDto>) -> ApiResult<Json<DepartemenListItem>> {
    Ok(Json(a002_departemen::service::create(dto).await?))
}

/// PUT /api/departemen/:id
pub async fn update(
    Path(id): Path<DepartemenId>,
    Json(dto): Json<DepartemenDto>,
) -> ApiResult<Json<DepartemenListItem>> {
    Ok(Json(a002_departemen::service::update(id, dto).await?))
}

/// DELETE /api/departemen/:id
pub async fn delete(Path(id): Path<DepartemenId>) -> ApiResult<Json<Value>> {
    a002_departemen::service::delete(id).await?;
    Ok(Json(json!({ "message": super::DELETED_MESSAGE })))
}
