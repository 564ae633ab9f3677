use axum::{http::StatusCode, Json};
use contracts::shared::logger::{CreateLogRequest, LogEntry};
use serde_json::{json, Value};

use crate::shared::api_error::ApiResult;
use crate::shared::logger;

/// GET /api/logs
pub async fn list_all() -> ApiResult<Json<Vec<LogEntry>>> {
    Ok(Json(logger::repository::get_all_logs().await?))
}

/// POST /api/logs
pub async fn create(Json(req): Json<CreateLogRequest>) -> ApiResult<StatusCode> {
    logger::repository::log_event(&req.source, &req.category, &req.message).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/logs
pub async fn clear_all() -> ApiResult<Json<Value>> {
    let removed = logger::repository::clear_all_logs().await?;
    Ok(Json(json!({ "message": "Logs cleared", "removed": removed })))
}
