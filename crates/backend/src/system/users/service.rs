use anyhow::Result;
use chrono::Utc;
use contracts::domain::common::DomainError;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use super::repository;
use crate::shared::logger;
use crate::system::auth::password;
use crate::system::roles::repository as roles_repository;

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

pub async fn get_by_id(id: i32) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn create(dto: CreateUserDto) -> Result<User> {
    dto.validate()?;
    let role_id = dto.role_id.ok_or_else(|| DomainError::required("roleId"))?;
    let nrp = dto.nrp.trim();

    if repository::get_by_nrp(nrp).await?.is_some() {
        return Err(DomainError::conflict(format!("NRP {} sudah terdaftar", nrp)).into());
    }
    ensure_role(role_id).await?;

    let password_hash = password::hash_password(&dto.password)?;
    let now = Utc::now().to_rfc3339();
    let id = repository::create_with_password(dto.name.trim(), nrp, role_id, &password_hash, &now)
        .await?;

    logger::log("users", &format!("User {} created", nrp));
    require(id).await
}

/// Full update; a blank password keeps the stored hash
pub async fn update(id: i32, dto: UpdateUserDto) -> Result<User> {
    dto.validate()?;
    let role_id = dto.role_id.ok_or_else(|| DomainError::required("roleId"))?;
    let nrp = dto.nrp.trim();

    require(id).await?;
    if let Some(other) = repository::get_by_nrp(nrp).await? {
        if other.id != id {
            return Err(DomainError::conflict(format!("NRP {} sudah terdaftar", nrp)).into());
        }
    }
    ensure_role(role_id).await?;

    let now = Utc::now().to_rfc3339();
    repository::update(id, dto.name.trim(), nrp, role_id, &now).await?;
    if let Some(new_password) = dto.new_password() {
        let password_hash = password::hash_password(new_password)?;
        repository::update_password(id, &password_hash, &now).await?;
    }

    logger::log("users", &format!("User {} updated", nrp));
    require(id).await
}

pub async fn delete(id: i32) -> Result<()> {
    if !repository::delete(id).await? {
        return Err(DomainError::not_found("user", id).into());
    }
    logger::log("users", &format!("User {} deleted", id));
    Ok(())
}

/// User for a matching nrp and password; records the login time
pub async fn verify_credentials(nrp: &str, password_input: &str) -> Result<Option<User>> {
    let user = match repository::get_by_nrp(nrp.trim()).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    let hash = match repository::get_password_hash(user.id).await? {
        Some(hash) => hash,
        None => return Ok(None),
    };

    if !password::verify_password(password_input, &hash)? {
        return Ok(None);
    }

    repository::update_last_login(user.id).await?;
    Ok(Some(user))
}

async fn require(id: i32) -> Result<User> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("user", id).into())
}

async fn ensure_role(role_id: i32) -> Result<()> {
    if roles_repository::get_by_id(role_id).await?.is_none() {
        return Err(DomainError::not_found("role", role_id).into());
    }
    Ok(())
}
