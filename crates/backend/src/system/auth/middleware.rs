use axum::{
    body::Body,
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

use crate::shared::api_error::ApiError;

/// Token of an `Authorization: Bearer ...` header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

async fn bearer_claims(token: Option<String>) -> Result<TokenClaims, ApiError> {
    let token = token
        .ok_or_else(|| ApiError::Unauthorized("Token tidak ditemukan".into()))?;

    super::jwt::validate_token(&token)
        .await
        .map_err(|_| ApiError::Unauthorized("Token tidak valid atau kedaluwarsa".into()))
}

/// Any valid access token
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers());
    let claims = bearer_claims(token).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Access token of the admin role
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers());
    let claims = bearer_claims(token).await?;
    if !claims.is_admin {
        return Err(ApiError::Forbidden("Hanya admin yang diizinkan".into()));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_read_from_authorization_header() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).as_deref(), Some("abc.def"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
