use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::system::auth::TokenClaims;
use contracts::system::users::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 30;
const JWT_SECRET_KEY: &str = "jwt_secret";

/// Claims of an access token issued at `now`
pub fn claims_for(user: &User, now: DateTime<Utc>) -> TokenClaims {
    TokenClaims {
        sub: user.id.to_string(),
        nrp: user.nrp.clone(),
        role: user.role.clone(),
        is_admin: user.is_admin(),
        exp: (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(token_data.claims)
}

/// Access token for the user, signed with the stored secret
pub async fn generate_access_token(user: &User) -> Result<String> {
    let secret = get_jwt_secret().await?;
    encode_claims(&claims_for(user, Utc::now()), &secret)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_claims(token, &secret)
}

pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Secret from sys_settings; generated and stored on first use
pub async fn get_jwt_secret() -> Result<String> {
    match get_jwt_secret_from_db().await {
        Ok(Some(secret)) => Ok(secret),
        Ok(None) => {
            let secret = generate_jwt_secret();
            save_jwt_secret_to_db(&secret).await?;
            tracing::info!("Generated new JWT secret");
            Ok(secret)
        }
        Err(e) => Err(e.context("Failed to read JWT secret")),
    }
}

/// 256 random bits, base64
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db() -> Result<Option<String>> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let result = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let secret: String = row.try_get("", "value")?;
            Ok(Some(secret))
        }
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(secret: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let now = Utc::now().to_rfc3339();
    // Two requests may race on first use; the first stored secret wins.
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                JWT_SECRET_KEY.into(),
                secret.to_string().into(),
                "Auto-generated JWT secret for authentication".into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;

    Ok(())
}

pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::RoleCategory;

    fn user(role: &str) -> User {
        User {
            id: 7,
            name: "Administrator".into(),
            nrp: "admin".into(),
            role_id: 1,
            role: Some(role.into()),
            role_category: RoleCategory::from_role_name(Some(role)),
            created_at: String::new(),
            updated_at: String::new(),
            last_login_at: None,
        }
    }

    #[test]
    fn token_round_trip_keeps_claims() {
        let claims = claims_for(&user("admin"), Utc::now());
        let token = encode_claims(&claims, "secret").unwrap();
        let decoded = decode_claims(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "7");
        assert_eq!(decoded.nrp, "admin");
        assert!(decoded.is_admin);
    }

    #[test]
    fn only_admin_role_gets_admin_claim() {
        assert!(!claims_for(&user("Dokter"), Utc::now()).is_admin);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_claims(&claims_for(&user("admin"), Utc::now()), "secret").unwrap();
        assert!(decode_claims(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now() - chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS + 1);
        let token = encode_claims(&claims_for(&user("admin"), issued), "secret").unwrap();
        assert!(decode_claims(&token, "secret").is_err());
    }

    #[test]
    fn generated_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        assert_eq!(general_purpose::STANDARD.decode(secret).unwrap().len(), 32);
    }
}
