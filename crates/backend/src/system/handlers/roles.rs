use axum::{extract::Path, Json};
use contracts::system::roles::{Role, RoleDto};
use serde_json::{json, Value};

use crate::shared::api_error::ApiResult;
use crate::system::roles::service;

/// GET /api/roles
pub async fn list_all() -> ApiResult<Json<Vec<Role>>> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/roles
pub async fn create(Json(dto): Json<RoleDto>) -> ApiResult<Json<Role>> {
    Ok(Json(service::create(dto).await?))
}

/// PUT /api/roles/:id
pub async fn update(Path(id): Path<i32>, Json(dto): Json<RoleDto>) -> ApiResult<Json<Role>> {
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/roles/:id
pub async fn delete(Path(id): Path<i32>) -> ApiResult<Json<Value>> {
    service::delete(id).await?;
    Ok(Json(json!({ "message": "Role deleted" })))
}
