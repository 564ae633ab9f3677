use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_perusahaan::aggregate::normalize_optional;
use crate::domain::a002_departemen::aggregate::{DepartemenId, DepartemenRef};
use crate::domain::a003_jabatan::aggregate::JabatanId;
use crate::domain::common::error::require_text;
use crate::domain::common::{
    lenient, AggregateRoot, BaseAggregate, DomainError, EntityMetadata, NamedRef,
};
use crate::shared::list::contains_ci;

crate::aggregate_id!(
    /// Employee id
    KaryawanId
);

/// Employment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KaryawanStatus {
    #[default]
    Active,
    Resigned,
    Leave,
}

impl KaryawanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KaryawanStatus::Active => "ACTIVE",
            KaryawanStatus::Resigned => "RESIGNED",
            KaryawanStatus::Leave => "LEAVE",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "ACTIVE" => Ok(KaryawanStatus::Active),
            "RESIGNED" => Ok(KaryawanStatus::Resigned),
            "LEAVE" => Ok(KaryawanStatus::Leave),
            other => Err(DomainError::invalid(format!(
                "Status karyawan '{}' tidak dikenal",
                other
            ))),
        }
    }
}

impl std::fmt::Display for KaryawanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Karyawan {
    #[serde(flatten)]
    pub base: BaseAggregate<KaryawanId>,
    /// Employee registration number
    pub nrp: String,
    pub nrp_bib: Option<String>,
    pub nama: String,
    pub telepon: Option<String>,
    pub status: KaryawanStatus,
    pub departemen_id: DepartemenId,
    pub jabatan_id: JabatanId,
    pub tanggal_lahir: Option<NaiveDate>,
    pub tanggal_masuk: Option<NaiveDate>,
    /// Height, cm
    pub tinggi_badan: Option<f64>,
    /// Weight, kg
    pub berat_badan: Option<f64>,
}

impl Karyawan {
    pub fn new_for_insert(dto: &KaryawanDto) -> Result<Self, DomainError> {
        let mut karyawan = Self {
            base: BaseAggregate::new(KaryawanId::unsaved()),
            nrp: String::new(),
            nrp_bib: None,
            nama: String::new(),
            telepon: None,
            status: KaryawanStatus::Active,
            departemen_id: DepartemenId::unsaved(),
            jabatan_id: JabatanId::unsaved(),
            tanggal_lahir: None,
            tanggal_masuk: None,
            tinggi_badan: None,
            berat_badan: None,
        };
        karyawan.update(dto)?;
        Ok(karyawan)
    }

    pub fn update(&mut self, dto: &KaryawanDto) -> Result<(), DomainError> {
        self.nrp = dto.nrp.trim().to_string();
        self.nrp_bib = normalize_optional(&dto.nrp_bib);
        self.nama = dto.nama.trim().to_string();
        self.telepon = normalize_optional(&dto.telepon);
        self.status = KaryawanStatus::parse(dto.status.as_deref().unwrap_or_default())?;
        self.departemen_id = DepartemenId(dto.departemen_id.unwrap_or_default());
        self.jabatan_id = JabatanId(dto.jabatan_id.unwrap_or_default());
        self.tanggal_lahir = dto.tanggal_lahir;
        self.tanggal_masuk = dto.tanggal_masuk;
        self.tinggi_badan = dto.tinggi_badan;
        self.berat_badan = dto.berat_badan;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("nrp", &self.nrp)?;
        require_text("nama", &self.nama)?;
        if self.departemen_id.is_unsaved() {
            return Err(DomainError::required("departemenId"));
        }
        if self.jabatan_id.is_unsaved() {
            return Err(DomainError::required("jabatanId"));
        }
        for (field, value) in [
            ("tinggiBadan", self.tinggi_badan),
            ("beratBadan", self.berat_badan),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(DomainError::invalid(format!(
                        "{} harus lebih besar dari 0",
                        field
                    )));
                }
            }
        }
        if let (Some(lahir), Some(masuk)) = (self.tanggal_lahir, self.tanggal_masuk) {
            if masuk < lahir {
                return Err(DomainError::invalid(
                    "Tanggal masuk tidak boleh sebelum tanggal lahir",
                ));
            }
        }
        Ok(())
    }

    /// The position must belong to the employee's department
    pub fn check_jabatan_departemen(
        &self,
        jabatan_departemen_id: DepartemenId,
    ) -> Result<(), DomainError> {
        if jabatan_departemen_id != self.departemen_id {
            return Err(DomainError::invalid(format!(
                "Jabatan {} bukan bagian dari departemen {}",
                self.jabatan_id, self.departemen_id
            )));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    pub fn to_ref(&self) -> NamedRef {
        NamedRef::new(self.base.id.0, &self.nrp, &self.nama)
    }
}

impl AggregateRoot for Karyawan {
    type Id = KaryawanId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.nrp
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
        "a004"
    }

    fn collection_name() -> &'static str {
        "karyawan"
    }

    fn element_name() -> &'static str {
        "Karyawan"
    }

    fn list_name() -> &'static str {
        "Daftar Karyawan"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create/update form of an employee
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaryawanDto {
    #[serde(default)]
    pub nrp: String,
    #[serde(default)]
    pub nrp_bib: Option<String>,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub telepon: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub departemen_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub jabatan_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub tanggal_lahir: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub tanggal_masuk: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub tinggi_badan: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub berat_badan: Option<f64>,
}

/// Employee with position, department and company
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaryawanListItem {
    #[serde(flatten)]
    pub karyawan: Karyawan,
    pub jabatan: Option<NamedRef>,
    pub departemen: Option<DepartemenRef>,
}

impl KaryawanListItem {
    pub fn perusahaan(&self) -> Option<&NamedRef> {
        self.departemen.as_ref().and_then(|d| d.perusahaan.as_ref())
    }
}

/// Filters of the employee picker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaryawanFilter {
    pub nama: Option<String>,
    pub jabatan: Option<String>,
    pub departemen: Option<String>,
    pub perusahaan: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_usize")]
    pub limit: Option<usize>,
    #[serde(default, deserialize_with = "lenient::opt_usize")]
    pub offset: Option<usize>,
}

impl KaryawanFilter {
    pub fn matches(&self, item: &KaryawanListItem) -> bool {
        let status_ok = match self.status.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(s) => item.karyawan.status.as_str().eq_ignore_ascii_case(s),
        };
        status_ok
            && contains_ci(Some(&item.karyawan.nama), self.nama.as_deref())
            && contains_ci(
                item.jabatan.as_ref().map(|j| j.nama.as_str()),
                self.jabatan.as_deref(),
            )
            && contains_ci(
                item.departemen.as_ref().map(|d| d.nama.as_str()),
                self.departemen.as_deref(),
            )
            && contains_ci(
                item.perusahaan().map(|p| p.nama.as_str()),
                self.perusahaan.as_deref(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> KaryawanDto {
        serde_json::from_str(
            r#"{
                "nrp": "PPA10000001",
                "nrpBib": "BIB-PPA10000001",
                "nama": "Budi Santoso",
                "telepon": "081234567890",
                "status": "ACTIVE",
                "departemenId": "2",
                "jabatanId": 7,
                "tanggalLahir": "1990-01-01",
                "tanggalMasuk": "2020-03-15T00:00:00.000Z",
                "tinggiBadan": "170",
                "beratBadan": 65
            }"#,
        )
        .unwrap()
    }

    fn item(nama: &str, jabatan: &str, departemen: &str, perusahaan: &str) -> KaryawanListItem {
        let mut d = dto();
        d.nama = nama.into();
        KaryawanListItem {
            karyawan: Karyawan::new_for_insert(&d).unwrap(),
            jabatan: Some(NamedRef::new(7, "J", jabatan)),
            departemen: Some(DepartemenRef {
                id: 2,
                kode: "D".into(),
                nama: departemen.into(),
                perusahaan: Some(NamedRef::new(1, "P", perusahaan)),
            }),
        }
    }

    #[test]
    fn form_values_are_converted() {
        let k = Karyawan::new_for_insert(&dto()).unwrap();
        assert_eq!(k.departemen_id, DepartemenId(2));
        assert_eq!(k.jabatan_id, JabatanId(7));
        assert_eq!(k.tinggi_badan, Some(170.0));
        assert_eq!(k.tanggal_masuk, NaiveDate::from_ymd_opt(2020, 3, 15));
        assert!(k.validate().is_ok());
    }

    #[test]
    fn unknown_status_is_rejected_and_empty_defaults_to_active() {
        let mut d = dto();
        d.status = Some("FIRED".into());
        assert!(Karyawan::new_for_insert(&d).is_err());
        d.status = None;
        assert_eq!(
            Karyawan::new_for_insert(&d).unwrap().status,
            KaryawanStatus::Active
        );
    }

    #[test]
    fn body_measurements_must_be_positive() {
        let mut d = dto();
        d.berat_badan = Some(0.0);
        let k = Karyawan::new_for_insert(&d).unwrap();
        assert!(matches!(k.validate(), Err(DomainError::Invalid(_))));
    }

    #[test]
    fn position_must_belong_to_department() {
        let k = Karyawan::new_for_insert(&dto()).unwrap();
        assert!(k.check_jabatan_departemen(DepartemenId(2)).is_ok());
        assert!(k.check_jabatan_departemen(DepartemenId(3)).is_err());
    }

    #[test]
    fn filter_matches_every_column_case_insensitively() {
        let budi = item("Budi Santoso", "Operator", "Operation", "PT. Putra Perkasa Abadi");
        let filter = KaryawanFilter {
            nama: Some("budi".into()),
            jabatan: Some("OPER".into()),
            perusahaan: Some("putra".into()),
            ..Default::default()
        };
        assert!(filter.matches(&budi));

        let other = KaryawanFilter {
            departemen: Some("plant".into()),
            ..Default::default()
        };
        assert!(!other.matches(&budi));
        assert!(KaryawanFilter::default().matches(&budi));
    }

    #[test]
    fn filter_by_status() {
        let budi = item("Budi", "Operator", "Operation", "PPA");
        let active = KaryawanFilter {
            status: Some("active".into()),
            ..Default::default()
        };
        let resigned = KaryawanFilter {
            status: Some("RESIGNED".into()),
            ..Default::default()
        };
        assert!(active.matches(&budi));
        assert!(!resigned.matches(&budi));
    }
}
