use serde::{Deserialize, Serialize};

use crate::domain::a001_perusahaan::aggregate::PerusahaanId;
use crate::domain::common::error::require_text;
use crate::domain::common::{
    lenient, AggregateRoot, BaseAggregate, DomainError, EntityMetadata, NamedRef,
};

crate::aggregate_id!(
    /// Department id
    DepartemenId
);

/// Department of a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departemen {
    #[serde(flatten)]
    pub base: BaseAggregate<DepartemenId>,
    pub kode: String,
    pub nama: String,
    pub perusahaan_id: PerusahaanId,
}

impl Departemen {
    pub fn new_for_insert(dto: &DepartemenDto) -> Self {
        Self {
            base: BaseAggregate::new(DepartemenId::unsaved()),
            kode: dto.kode.trim().to_string(),
            nama: dto.nama.trim().to_string(),
            perusahaan_id: PerusahaanId(dto.perusahaan_id.unwrap_or_default()),
        }
    }

    pub fn update(&mut self, dto: &DepartemenDto) {
        self.kode = dto.kode.trim().to_string();
        self.nama = dto.nama.trim().to_string();
        self.perusahaan_id = PerusahaanId(dto.perusahaan_id.unwrap_or_default());
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("kode", &self.kode)?;
        require_text("nama", &self.nama)?;
        if self.perusahaan_id.is_unsaved() {
            return Err(DomainError::required("perusahaanId"));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    pub fn to_ref(&self) -> NamedRef {
        NamedRef::new(self.base.id.0, &self.kode, &self.nama)
    }
}

impl AggregateRoot for Departemen {
    type Id = DepartemenId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "departemen"
    }

    fn element_name() -> &'static str {
        "Departemen"
    }

    fn list_name() -> &'static str {
        "Daftar Departemen"
    }
}

/// Create/update form of a department
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartemenDto {
    #[serde(default)]
    pub kode: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub perusahaan_id: Option<i32>,
}

/// Department reference that carries its company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartemenRef {
    pub id: i32,
    pub kode: String,
    pub nama: String,
    pub perusahaan: Option<NamedRef>,
}

/// Department with its company, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartemenListItem {
    #[serde(flatten)]
    pub departemen: Departemen,
    pub perusahaan: Option<NamedRef>,
}

impl DepartemenListItem {
    pub fn to_ref(&self) -> DepartemenRef {
        DepartemenRef {
            id: self.departemen.base.id.0,
            kode: self.departemen.kode.clone(),
            nama: self.departemen.nama.clone(),
            perusahaan: self.perusahaan.clone(),
        }
    }
}

/// Query of the department list; narrows the dropdown to one company
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartemenQuery {
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub perusahaan_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_is_required() {
        let dto: DepartemenDto =
            serde_json::from_str(r#"{"kode": "PPA-OPS", "nama": "Operation", "perusahaanId": ""}"#)
                .unwrap();
        let d = Departemen::new_for_insert(&dto);
        assert_eq!(d.validate(), Err(DomainError::required("perusahaanId")));
    }

    #[test]
    fn company_id_may_arrive_as_text() {
        let dto: DepartemenDto =
            serde_json::from_str(r#"{"kode": "PPA-OPS", "nama": "Operation", "perusahaanId": "4"}"#)
                .unwrap();
        let d = Departemen::new_for_insert(&dto);
        assert_eq!(d.perusahaan_id, PerusahaanId(4));
        assert!(d.validate().is_ok());
    }
}
