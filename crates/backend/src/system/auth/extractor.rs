use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::api_error::ApiError;

/// Claims put into the request by the auth middleware.
/// Usage: `async fn handler(CurrentUser(claims): CurrentUser)`
pub struct CurrentUser(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Token tidak ditemukan".into()))
    }
}
