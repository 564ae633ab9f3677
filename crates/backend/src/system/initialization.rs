use anyhow::Result;
use contracts::system::roles::ADMIN_ROLE;
use contracts::system::users::CreateUserDto;

use crate::system::roles::service as roles_service;
use crate::system::users::{repository, service};

const DEFAULT_ADMIN_NRP: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Admin role always exists; an admin user is created while the user table is empty
pub async fn ensure_admin_user_exists() -> Result<()> {
    let admin_role = roles_service::ensure(ADMIN_ROLE, "Administrator sistem").await?;

    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");

    let user = service::create(CreateUserDto {
        name: "Administrator".to_string(),
        nrp: DEFAULT_ADMIN_NRP.to_string(),
        password: DEFAULT_ADMIN_PASSWORD.to_string(),
        role_id: Some(admin_role.id),
    })
    .await?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin user created!");
    tracing::warn!("  NRP: {}", DEFAULT_ADMIN_NRP);
    tracing::warn!("  Password: {}", DEFAULT_ADMIN_PASSWORD);
    tracing::warn!("  User ID: {}", user.id);
    tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");

    Ok(())
}
