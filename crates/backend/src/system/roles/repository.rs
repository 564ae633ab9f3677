use anyhow::{Context, Result};
use contracts::system::roles::Role;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

fn from_row(row: &QueryResult) -> Result<Role> {
    Ok(Role {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        description: row.try_get("", "description")?,
    })
}

pub async fn list_all() -> Result<Vec<Role>> {
    let rows = get_connection()
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT id, name, description FROM sys_roles ORDER BY name".to_owned(),
        ))
        .await?;

    rows.iter().map(from_row).collect()
}

pub async fn get_by_id(id: i32) -> Result<Option<Role>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, name, description FROM sys_roles WHERE id = ?",
            [id.into()],
        ))
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Case-insensitive lookup
pub async fn get_by_name(name: &str) -> Result<Option<Role>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, name, description FROM sys_roles WHERE lower(name) = lower(?)",
            [name.trim().into()],
        ))
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn insert(name: &str, description: Option<&str>) -> Result<i32> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_roles (name, description, created_at, updated_at) VALUES (?, ?, ?, ?)",
            [
                name.into(),
                description.map(str::to_owned).into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to insert role")?;

    Ok(result.last_insert_id() as i32)
}

pub async fn update(id: i32, name: &str, description: Option<&str>) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_roles SET name = ?, description = ?, updated_at = ? WHERE id = ?",
            [
                name.into(),
                description.map(str::to_owned).into(),
                now.into(),
                id.into(),
            ],
        ))
        .await
        .context("Failed to update role")?;

    Ok(())
}

pub async fn delete(id: i32) -> Result<bool> {
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_roles WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete role")?;

    Ok(result.rows_affected() > 0)
}
