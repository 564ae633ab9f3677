use serde::{Deserialize, Serialize};

use crate::domain::a002_departemen::aggregate::{DepartemenId, DepartemenRef};
use crate::domain::common::error::require_text;
use crate::domain::common::{
    lenient, AggregateRoot, BaseAggregate, DomainError, EntityMetadata, NamedRef,
};

crate::aggregate_id!(
    /// Position id
    JabatanId
);

/// Position inside a department.
///
/// The company of a position is always the company of its department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jabatan {
    #[serde(flatten)]
    pub base: BaseAggregate<JabatanId>,
    pub kode: String,
    pub nama: String,
    pub departemen_id: DepartemenId,
}

impl Jabatan {
    pub fn new_for_insert(dto: &JabatanDto) -> Self {
        Self {
            base: BaseAggregate::new(JabatanId::unsaved()),
            kode: dto.kode.trim().to_string(),
            nama: dto.nama.trim().to_string(),
            departemen_id: DepartemenId(dto.departemen_id.unwrap_or_default()),
        }
    }

    pub fn update(&mut self, dto: &JabatanDto) {
        self.kode = dto.kode.trim().to_string();
        self.nama = dto.nama.trim().to_string();
        self.departemen_id = DepartemenId(dto.departemen_id.unwrap_or_default());
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("kode", &self.kode)?;
        require_text("nama", &self.nama)?;
        if self.departemen_id.is_unsaved() {
            return Err(DomainError::required("departemenId"));
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

impl AggregateRoot for Jabatan {
    type Id = JabatanId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "jabatan"
    }

    fn element_name() -> &'static str {
        "Jabatan"
    }

    fn list_name() -> &'static str {
        "Daftar Jabatan"
    }
}

/// Create/update form of a position; the company is derived from the department
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JabatanDto {
    #[serde(default)]
    pub kode: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub departemen_id: Option<i32>,
}

/// Position with department and company, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JabatanListItem {
    #[serde(flatten)]
    pub jabatan: Jabatan,
    pub departemen: Option<DepartemenRef>,
}

/// Query of the position list; narrows the dropdown to one department
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JabatanQuery {
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub departemen_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_is_required() {
        let j = Jabatan::new_for_insert(&JabatanDto {
            kode: "PPA-OPS-OPERATOR".into(),
            nama: "Operator".into(),
            departemen_id: None,
        });
        assert_eq!(j.validate(), Err(DomainError::required("departemenId")));
    }

    #[test]
    fn list_item_embeds_department_with_company() {
        let mut j = Jabatan::new_for_insert(&JabatanDto {
            kode: "PPA-OPS-OPERATOR".into(),
            nama: "Operator".into(),
            departemen_id: Some(2),
        });
        j.base.id = JabatanId(9);
        let item = JabatanListItem {
            jabatan: j,
            departemen: Some(DepartemenRef {
                id: 2,
                kode: "PPA-OPS".into(),
                nama: "Operation".into(),
                perusahaan: Some(NamedRef::new(1, "PPA", "PT. Putra Perkasa Abadi")),
            }),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["departemenId"], 2);
        assert_eq!(json["departemen"]["perusahaan"]["kode"], "PPA");
    }
}
