use serde::{Deserialize, Serialize};

use crate::domain::common::{require_text, DomainError};

/// Name of the role that may manage users and roles
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        is_admin_role(&self.name)
    }
}

pub fn is_admin_role(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(ADMIN_ROLE)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoleDto {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_recognised_case_insensitively() {
        assert!(is_admin_role("Admin"));
        assert!(is_admin_role(" admin "));
        assert!(!is_admin_role("administrator"));
    }

    #[test]
    fn role_name_is_required() {
        let dto = RoleDto {
            name: "  ".into(),
            description: None,
        };
        assert_eq!(dto.validate(), Err(DomainError::required("name")));
    }
}
