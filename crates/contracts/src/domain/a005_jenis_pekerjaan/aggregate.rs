use serde::{Deserialize, Serialize};

use crate::domain::common::error::require_text;
use crate::domain::common::{
    AggregateRoot, BaseAggregate, DomainError, EntityMetadata, NamedRef,
};

crate::aggregate_id!(
    /// Job type id
    JenisPekerjaanId
);

/// Kind of (high-risk) work a permit is requested for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenisPekerjaan {
    #[serde(flatten)]
    pub base: BaseAggregate<JenisPekerjaanId>,
    pub kode: String,
    pub nama: String,
}

impl JenisPekerjaan {
    pub fn new_for_insert(dto: &JenisPekerjaanDto) -> Self {
        Self {
            base: BaseAggregate::new(JenisPekerjaanId::unsaved()),
            kode: dto.kode.trim().to_string(),
            nama: dto.nama.trim().to_string(),
        }
    }

    pub fn update(&mut self, dto: &JenisPekerjaanDto) {
        self.kode = dto.kode.trim().to_string();
        self.nama = dto.nama.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("kode", &self.kode)?;
        require_text("nama", &self.nama)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    pub fn to_ref(&self) -> NamedRef {
        NamedRef::new(self.base.id.0, &self.kode, &self.nama)
    }
}

impl AggregateRoot for JenisPekerjaan {
    type Id = JenisPekerjaanId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "jenis_pekerjaan"
    }

    fn element_name() -> &'static str {
        "Jenis Pekerjaan"
    }

    fn list_name() -> &'static str {
        "Daftar Jenis Pekerjaan"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenisPekerjaanDto {
    #[serde(default)]
    pub kode: String,
    #[serde(default)]
    pub nama: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_follows_aggregate_index() {
        assert_eq!(JenisPekerjaan::full_name(), "a005_jenis_pekerjaan");
    }

    #[test]
    fn nama_is_required() {
        let jp = JenisPekerjaan::new_for_insert(&JenisPekerjaanDto {
            kode: "WAH".into(),
            nama: "".into(),
        });
        assert_eq!(jp.validate(), Err(DomainError::required("nama")));
    }
}
