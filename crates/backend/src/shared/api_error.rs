use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::DomainError;
use serde_json::json;
use thiserror::Error;

/// Error returned by every JSON handler; renders as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(what: &str, id: i32) -> Self {
        ApiError::NotFound(DomainError::not_found(what, id).to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::Required(_) | DomainError::Invalid(_) => ApiError::Validation(message),
            DomainError::NotFound { .. } => ApiError::NotFound(message),
            DomainError::Conflict(_) => ApiError::Conflict(message),
        }
    }
}

/// Services report rule violations as `DomainError` inside `anyhow`;
/// everything else is an internal failure.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => {
                tracing::error!("Request failed: {:#}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (DomainError::required("nama"), StatusCode::BAD_REQUEST),
            (DomainError::invalid("min > max"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("Karyawan", 3), StatusCode::NOT_FOUND),
            (DomainError::conflict("kode sudah dipakai"), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn domain_error_survives_anyhow() {
        let err: anyhow::Error = DomainError::required("judulPekerjaan").into();
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.to_string(), "Mohon lengkapi field: judulPekerjaan");
    }

    #[test]
    fn other_errors_are_internal() {
        let api = ApiError::from(anyhow::anyhow!("disk full"));
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn renders_error_body() {
        let response = ApiError::Forbidden("Admin only".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Admin only" }));
    }
}
