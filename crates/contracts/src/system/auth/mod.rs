use serde::{Deserialize, Serialize};

use super::users::{RoleCategory, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub nrp: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i32,
    pub nrp: String,
    pub name: String,
    pub role: Option<String>,
    pub role_category: RoleCategory,
    pub is_admin: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            nrp: user.nrp.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            role_category: user.role_category,
            is_admin: user.is_admin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user id
    pub nrp: String,
    pub role: Option<String>,
    pub is_admin: bool,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}
