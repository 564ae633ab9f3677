use anyhow::{Context, Result};
use contracts::system::users::{RoleCategory, User};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const SELECT_USER: &str = "SELECT u.id, u.nrp, u.name, u.role_id, r.name AS role,
        u.created_at, u.updated_at, u.last_login_at
     FROM sys_users u
     LEFT JOIN sys_roles r ON r.id = u.role_id";

fn from_row(row: &QueryResult) -> Result<User> {
    let role: Option<String> = row.try_get("", "role")?;
    Ok(User {
        id: row.try_get("", "id")?,
        nrp: row.try_get("", "nrp")?,
        name: row.try_get("", "name")?,
        role_id: row.try_get("", "role_id")?,
        role_category: RoleCategory::from_role_name(role.as_deref()),
        role,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

async fn query_one(sql: String, values: Vec<sea_orm::Value>) -> Result<Option<User>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(DatabaseBackend::Sqlite, &sql, values))
        .await?;
    row.as_ref().map(from_row).transpose()
}

/// Insert a user and return the new id
pub async fn create_with_password(
    name: &str,
    nrp: &str,
    role_id: i32,
    password_hash: &str,
    now: &str,
) -> Result<i32> {
    let result = get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_users (nrp, name, password_hash, role_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            [
                nrp.into(),
                name.into(),
                password_hash.into(),
                role_id.into(),
                now.into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;

    Ok(result.last_insert_id() as i32)
}

pub async fn get_by_id(id: i32) -> Result<Option<User>> {
    query_one(format!("{} WHERE u.id = ?", SELECT_USER), vec![id.into()]).await
}

pub async fn get_by_nrp(nrp: &str) -> Result<Option<User>> {
    query_one(format!("{} WHERE u.nrp = ?", SELECT_USER), vec![nrp.into()]).await
}

pub async fn get_password_hash(user_id: i32) -> Result<Option<String>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

/// All users, by name
pub async fn list_all() -> Result<Vec<User>> {
    let rows = get_connection()
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("{} ORDER BY u.name", SELECT_USER),
        ))
        .await?;

    rows.iter().map(from_row).collect()
}

pub async fn update(id: i32, name: &str, nrp: &str, role_id: i32, now: &str) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET name = ?, nrp = ?, role_id = ?, updated_at = ? WHERE id = ?",
            [name.into(), nrp.into(), role_id.into(), now.into(), id.into()],
        ))
        .await
        .context("Failed to update user")?;

    Ok(())
}

pub async fn update_password(id: i32, password_hash: &str, now: &str) -> Result<()> {
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET password_hash = ?, updated_at = ? WHERE id = ?",
            [password_hash.into(), now.into(), id.into()],
        ))
        .await
        .context("Failed to update password")?;

    Ok(())
}

pub async fn update_last_login(id: i32) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
            [now.into(), id.into()],
        ))
        .await?;

    Ok(())
}

/// Remove the user with its refresh tokens; false when no such user
pub async fn delete(id: i32) -> Result<bool> {
    let conn = get_connection();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM sys_refresh_tokens WHERE user_id = ?",
        [id.into()],
    ))
    .await?;

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete user")?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_users() -> Result<i64> {
    let row = get_connection()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM sys_users".to_owned(),
        ))
        .await?;

    match row {
        Some(row) => Ok(row.try_get("", "count")?),
        None => Ok(0),
    }
}

pub async fn count_by_role(role_id: i32) -> Result<i64> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM sys_users WHERE role_id = ?",
            [role_id.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(row.try_get("", "count")?),
        None => Ok(0),
    }
}
