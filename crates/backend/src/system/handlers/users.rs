use axum::{extract::Path, Json};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use serde_json::{json, Value};

use crate::shared::api_error::ApiResult;
use crate::system::users::service;

/// GET /api/users
pub async fn list_all() -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/users
pub async fn create(Json(dto): Json<CreateUserDto>) -> ApiResult<Json<User>> {
    Ok(Json(service::create(dto).await?))
}

/// PUT /api/users/:id
pub async fn update(Path(id): Path<i32>, Json(dto): Json<UpdateUserDto>) -> ApiResult<Json<User>> {
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/users/:id
pub async fn delete(Path(id): Path<i32>) -> ApiResult<Json<Value>> {
    service::delete(id).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}
