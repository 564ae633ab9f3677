use thiserror::Error;

/// Business rule violations reported by aggregates and services.
///
/// The backend maps these onto HTTP status codes; anything that is not a
/// `DomainError` is treated as an internal failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Mohon lengkapi field: {0}")]
    Required(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{entity} dengan id {id} tidak ditemukan")]
    NotFound { entity: String, id: i32 },

    #[error("{0}")]
    Conflict(String),
}

impl DomainError {
    pub fn required(field: &str) -> Self {
        Self::Required(field.to_string())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Fails with [`DomainError::Required`] when `value` is blank.
pub fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            DomainError::required("judulPekerjaan").to_string(),
            "Mohon lengkapi field: judulPekerjaan"
        );
        assert_eq!(
            DomainError::not_found("Karyawan", 5).to_string(),
            "Karyawan dengan id 5 tidak ditemukan"
        );
    }

    #[test]
    fn blank_text_is_required() {
        assert!(require_text("kode", "  ").is_err());
        assert!(require_text("kode", "PPA").is_ok());
    }
}
