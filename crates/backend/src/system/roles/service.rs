use anyhow::Result;
use contracts::domain::common::DomainError;
use contracts::system::roles::{Role, RoleDto};

use super::repository;
use crate::shared::logger;
use crate::system::users::repository as users_repository;

pub async fn list_all() -> Result<Vec<Role>> {
    repository::list_all().await
}

pub async fn create(dto: RoleDto) -> Result<Role> {
    dto.validate()?;
    let name = dto.name.trim();
    ensure_name_free(name, None).await?;

    let id = repository::insert(name, description(&dto)).await?;
    logger::log("roles", &format!("Role {} created", name));
    require(id).await
}

pub async fn update(id: i32, dto: RoleDto) -> Result<Role> {
    dto.validate()?;
    require(id).await?;
    let name = dto.name.trim();
    ensure_name_free(name, Some(id)).await?;

    repository::update(id, name, description(&dto)).await?;
    logger::log("roles", &format!("Role {} updated", name));
    require(id).await
}

/// Refused while any user still holds the role
pub async fn delete(id: i32) -> Result<()> {
    let role = require(id).await?;
    let holders = users_repository::count_by_role(id).await?;
    if holders > 0 {
        return Err(DomainError::conflict(format!(
            "Role {} masih dipakai oleh {} user",
            role.name, holders
        ))
        .into());
    }

    repository::delete(id).await?;
    logger::log("roles", &format!("Role {} deleted", role.name));
    Ok(())
}

/// Existing role with this name, or a new one
pub async fn ensure(name: &str, description: &str) -> Result<Role> {
    if let Some(role) = repository::get_by_name(name).await? {
        return Ok(role);
    }
    let id = repository::insert(name, Some(description)).await?;
    require(id).await
}

async fn require(id: i32) -> Result<Role> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("role", id).into())
}

async fn ensure_name_free(name: &str, own_id: Option<i32>) -> Result<()> {
    match repository::get_by_name(name).await? {
        Some(existing) if Some(existing.id) != own_id => {
            Err(DomainError::conflict(format!("Role {} sudah ada", name)).into())
        }
        _ => Ok(()),
    }
}

fn description(dto: &RoleDto) -> Option<&str> {
    dto.description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
}
