use serde::{Deserialize, Serialize};

use crate::domain::common::error::require_text;
use crate::domain::common::{
    AggregateRoot, BaseAggregate, DomainError, EntityMetadata, NamedRef,
};

// ============================================================================
// ID Type
// ============================================================================

crate::aggregate_id!(
    /// Company id
    PerusahaanId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Company that employees, departments and permits belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perusahaan {
    #[serde(flatten)]
    pub base: BaseAggregate<PerusahaanId>,
    pub kode: String,
    pub nama: String,
    pub alamat: Option<String>,
}

impl Perusahaan {
    pub fn new_for_insert(dto: &PerusahaanDto) -> Self {
        Self {
            base: BaseAggregate::new(PerusahaanId::unsaved()),
            kode: dto.kode.trim().to_string(),
            nama: dto.nama.trim().to_string(),
            alamat: normalize_optional(&dto.alamat),
        }
    }

    pub fn update(&mut self, dto: &PerusahaanDto) {
        self.kode = dto.kode.trim().to_string();
        self.nama = dto.nama.trim().to_string();
        self.alamat = normalize_optional(&dto.alamat);
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("kode", &self.kode)?;
        require_text("nama", &self.nama)?;
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    pub fn to_ref(&self) -> NamedRef {
        NamedRef::new(self.base.id.0, &self.kode, &self.nama)
    }
}

pub(crate) fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AggregateRoot for Perusahaan {
    type Id = PerusahaanId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.kode
    }

    fn description(&self) -> &str {
        &self.nama
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "perusahaan"
    }

    fn element_name() -> &'static str {
        "Perusahaan"
    }

    fn list_name() -> &'static str {
        "Daftar Perusahaan"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create/update form of a company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerusahaanDto {
    #[serde(default)]
    pub kode: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub alamat: Option<String>,
}

/// Company with its departments, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerusahaanListItem {
    #[serde(flatten)]
    pub perusahaan: Perusahaan,
    pub departemen: Vec<NamedRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(kode: &str, nama: &str) -> PerusahaanDto {
        PerusahaanDto {
            kode: kode.into(),
            nama: nama.into(),
            alamat: Some("  ".into()),
        }
    }

    #[test]
    fn new_company_is_trimmed_and_valid() {
        let p = Perusahaan::new_for_insert(&dto(" PPA ", "PT. Putra Perkasa Abadi"));
        assert_eq!(p.kode, "PPA");
        assert_eq!(p.alamat, None);
        assert!(p.base.id.is_unsaved());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn kode_and_nama_are_required() {
        assert_eq!(
            Perusahaan::new_for_insert(&dto("", "X")).validate(),
            Err(DomainError::required("kode"))
        );
        assert_eq!(
            Perusahaan::new_for_insert(&dto("X", " ")).validate(),
            Err(DomainError::required("nama"))
        );
    }

    #[test]
    fn serializes_with_form_field_names() {
        let p = Perusahaan::new_for_insert(&dto("PPA", "Putra"));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["kode"], "PPA");
        assert_eq!(json["nama"], "Putra");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("isDeleted").is_none());
    }
}
