use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};

use crate::shared::api_error::{ApiError, ApiResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

/// POST /api/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let user = user_service::verify_credentials(&request.nrp, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("NRP atau password salah".into()))?;

    let access_token = jwt::generate_access_token(&user).await?;
    let refresh_token = jwt::generate_refresh_token();
    store_refresh_token(user.id, &refresh_token).await?;

    tracing::info!("User {} logged in", user.nrp);

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        user: UserInfo::from(&user),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(Json(request): Json<RefreshRequest>) -> ApiResult<Json<RefreshResponse>> {
    let user_id = validate_refresh_token(&request.refresh_token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Refresh token tidak valid".into()))?;

    let user = user_service::get_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User tidak ditemukan".into()))?;

    let access_token = jwt::generate_access_token(&user).await?;
    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/auth/logout
pub async fn logout(Json(request): Json<RefreshRequest>) -> ApiResult<StatusCode> {
    revoke_refresh_token(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}

/// GET /api/auth/me
pub async fn current_user(CurrentUser(claims): CurrentUser) -> ApiResult<Json<UserInfo>> {
    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Token tidak valid".into()))?;

    let user = user_service::get_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", user_id))?;

    Ok(Json(UserInfo::from(&user)))
}

// Refresh tokens are stored as sha256 hashes only

async fn store_refresh_token(user_id: i32, token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_id = uuid::Uuid::new_v4().to_string();
    let expires_at = jwt::calculate_refresh_token_expiration();
    let created_at = Utc::now().to_rfc3339();

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                token_id.into(),
                user_id.into(),
                hash_token(token).into(),
                expires_at.into(),
                created_at.into(),
            ],
        ))
        .await?;

    Ok(())
}

/// Owner of a live refresh token
async fn validate_refresh_token(token: &str) -> anyhow::Result<Option<i32>> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let now = Utc::now().to_rfc3339();
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [hash_token(token).into(), now.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "user_id")?)),
        None => Ok(None),
    }
}

async fn revoke_refresh_token(token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let revoked_at = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
            [revoked_at.into(), hash_token(token).into()],
        ))
        .await?;

    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_stable_hex_sha256() {
        let hash = hash_token("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash_token("abd"), hash);
    }
}
