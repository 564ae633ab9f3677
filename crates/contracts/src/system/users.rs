use serde::{Deserialize, Serialize};

use crate::domain::common::{lenient, require_text, DomainError};

/// Display group of a role, used for icons and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    Admin,
    Doctor,
    Paramedic,
    Supervisor,
    Staff,
}

impl RoleCategory {
    pub fn from_role_name(name: Option<&str>) -> Self {
        let name = name.unwrap_or_default().to_lowercase();
        if name.contains("admin") {
            RoleCategory::Admin
        } else if name.contains("dokter") {
            RoleCategory::Doctor
        } else if name.contains("paramedik") || name.contains("perawat") {
            RoleCategory::Paramedic
        } else if name.contains("supervisor") {
            RoleCategory::Supervisor
        } else {
            RoleCategory::Staff
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub nrp: String,
    pub role_id: i32,
    pub role: Option<String>,
    pub role_category: RoleCategory,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref().map(super::roles::is_admin_role).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nrp: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub role_id: Option<i32>,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        require_text("nrp", &self.nrp)?;
        require_text("password", &self.password)?;
        self.role_id.ok_or_else(|| DomainError::required("roleId"))?;
        Ok(())
    }
}

/// Empty or absent password keeps the stored one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nrp: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub role_id: Option<i32>,
}

impl UpdateUserDto {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        require_text("nrp", &self.nrp)?;
        self.role_id.ok_or_else(|| DomainError::required("roleId"))?;
        Ok(())
    }

    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_category_follows_role_name() {
        assert_eq!(RoleCategory::from_role_name(Some("Super Admin")), RoleCategory::Admin);
        assert_eq!(RoleCategory::from_role_name(Some("Dokter Umum")), RoleCategory::Doctor);
        assert_eq!(RoleCategory::from_role_name(Some("Perawat")), RoleCategory::Paramedic);
        assert_eq!(RoleCategory::from_role_name(Some("paramedik")), RoleCategory::Paramedic);
        assert_eq!(RoleCategory::from_role_name(Some("Supervisor K3")), RoleCategory::Supervisor);
        assert_eq!(RoleCategory::from_role_name(Some("Clerk")), RoleCategory::Staff);
        assert_eq!(RoleCategory::from_role_name(None), RoleCategory::Staff);
    }

    #[test]
    fn role_id_arrives_as_string_from_forms() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"name":"Andi","nrp":"1001","password":"x","roleId":"2"}"#,
        )
        .unwrap();
        assert_eq!(dto.role_id, Some(2));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn blank_password_on_update_keeps_current_one() {
        let dto: UpdateUserDto =
            serde_json::from_str(r#"{"name":"Andi","nrp":"1001","password":""}"#).unwrap();
        assert_eq!(dto.new_password(), None);

        let dto: UpdateUserDto =
            serde_json::from_str(r#"{"name":"Andi","nrp":"1001","password":"baru"}"#).unwrap();
        assert_eq!(dto.new_password(), Some("baru"));
    }

    #[test]
    fn create_requires_password() {
        let dto = CreateUserDto {
            name: "Andi".into(),
            nrp: "1001".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate(), Err(DomainError::required("password")));
    }

    #[test]
    fn role_is_required() {
        let dto: UpdateUserDto =
            serde_json::from_str(r#"{"name":"Andi","nrp":"1001","roleId":""}"#).unwrap();
        assert_eq!(dto.validate(), Err(DomainError::required("roleId")));
    }
}
