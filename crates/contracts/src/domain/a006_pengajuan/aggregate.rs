use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::status::PengajuanStatus;
use crate::domain::a001_perusahaan::aggregate::PerusahaanId;
use crate::domain::a002_departemen::aggregate::DepartemenId;
use crate::domain::a003_jabatan::aggregate::JabatanId;
use crate::domain::a004_karyawan::aggregate::KaryawanId;
use crate::domain::a005_jenis_pekerjaan::aggregate::JenisPekerjaanId;
use crate::domain::common::{
    lenient, AggregateRoot, BaseAggregate, DomainError, EntityMetadata, NamedRef,
};

crate::aggregate_id!(
    /// Work permit id
    PengajuanId
);

pub const DEFAULT_WAKTU: &str = "08:00";

/// Examiner's recommendation for a team member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rekomendasi {
    Ya,
    Tidak,
    #[default]
    #[serde(rename = "")]
    Kosong,
}

impl Rekomendasi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rekomendasi::Ya => "Ya",
            Rekomendasi::Tidak => "Tidak",
            Rekomendasi::Kosong => "",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Ya" => Rekomendasi::Ya,
            "Tidak" => Rekomendasi::Tidak,
            _ => Rekomendasi::Kosong,
        }
    }
}

/// One team member on the permit with the physical examination readings.
///
/// Readings are kept as typed on the form; the fitness rule parses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnggotaTim {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub karyawan_id: Option<KaryawanId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub nama: String,
    /// Blood pressure, "systole/diastole"
    #[serde(default, deserialize_with = "lenient::text")]
    pub td: String,
    /// Pulse
    #[serde(default, deserialize_with = "lenient::text")]
    pub nadi: String,
    /// Respiration rate
    #[serde(default, deserialize_with = "lenient::text")]
    pub rr: String,
    /// Oxygen saturation
    #[serde(default, deserialize_with = "lenient::text")]
    pub sao2: String,
    /// Body temperature
    #[serde(default, deserialize_with = "lenient::text")]
    pub suhu: String,
    /// Complaint
    #[serde(default, deserialize_with = "lenient::text")]
    pub keluhan: String,
    #[serde(default)]
    pub rekomendasi: Rekomendasi,
}

impl AnggotaTim {
    /// Row of the permit holder as it is created with a new permit
    pub fn for_holder(karyawan_id: KaryawanId, nama: &str) -> Self {
        Self {
            karyawan_id: Some(karyawan_id),
            nama: nama.to_string(),
            rekomendasi: Rekomendasi::Ya,
            ..Default::default()
        }
    }

    /// At least one vital sign was filled in
    pub fn is_examined(&self) -> bool {
        [&self.td, &self.nadi, &self.rr, &self.sao2, &self.suhu]
            .iter()
            .any(|v| !v.trim().is_empty())
    }
}

/// Work permit submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pengajuan {
    #[serde(flatten)]
    pub base: BaseAggregate<PengajuanId>,
    pub tanggal: NaiveDate,
    pub waktu: String,
    pub lokasi_kerja: String,
    pub judul_pekerjaan: String,
    pub nomor_izin_kerja: String,
    pub keterangan: String,
    pub status: PengajuanStatus,
    pub departemen_id: DepartemenId,
    /// Permit holder
    pub pemegang_ijin_id: KaryawanId,
    pub jabatan_id: JabatanId,
    pub perusahaan_id: PerusahaanId,
    pub jenis_pekerjaan_id: JenisPekerjaanId,
    /// Examiner
    pub petugas_pemeriksa_id: Option<KaryawanId>,
    /// Work supervisor
    pub pengawas_pekerjaan_id: Option<KaryawanId>,
    /// Team roster with examination readings; the holder is always first
    pub pemeriksaan_fisik: Vec<AnggotaTim>,
}

impl Pengajuan {
    pub fn new_for_insert(dto: &PengajuanDto, today: NaiveDate) -> Self {
        let mut p = Self {
            base: BaseAggregate::new(PengajuanId::unsaved()),
            tanggal: today,
            waktu: DEFAULT_WAKTU.to_string(),
            lokasi_kerja: String::new(),
            judul_pekerjaan: String::new(),
            nomor_izin_kerja: String::new(),
            keterangan: String::new(),
            status: PengajuanStatus::Diajukan,
            departemen_id: DepartemenId::unsaved(),
            pemegang_ijin_id: KaryawanId::unsaved(),
            jabatan_id: JabatanId::unsaved(),
            perusahaan_id: PerusahaanId::unsaved(),
            jenis_pekerjaan_id: JenisPekerjaanId::unsaved(),
            petugas_pemeriksa_id: None,
            pengawas_pekerjaan_id: None,
            pemeriksaan_fisik: Vec::new(),
        };
        p.apply_header(dto);
        p
    }

    /// Copies the header form onto the permit.
    ///
    /// The form is submitted whole; only date and time keep their current
    /// value when left out. Status and team are handled separately.
    pub fn apply_header(&mut self, dto: &PengajuanDto) {
        if let Some(tanggal) = dto.tanggal {
            self.tanggal = tanggal;
        }
        if let Some(waktu) = dto.waktu.as_deref().map(str::trim).filter(|w| !w.is_empty()) {
            self.waktu = waktu.to_string();
        }
        self.lokasi_kerja = trimmed(&dto.lokasi_kerja);
        self.judul_pekerjaan = trimmed(&dto.judul_pekerjaan);
        self.nomor_izin_kerja = trimmed(&dto.nomor_izin_kerja);
        self.keterangan = dto.keterangan.clone().unwrap_or_default();
        self.departemen_id = DepartemenId(dto.departemen_id.unwrap_or_default());
        self.pemegang_ijin_id = KaryawanId(dto.pemegang_ijin_id.unwrap_or_default());
        self.jabatan_id = JabatanId(dto.jabatan_id.unwrap_or_default());
        self.perusahaan_id = PerusahaanId(dto.perusahaan_id.unwrap_or_default());
        self.jenis_pekerjaan_id = JenisPekerjaanId(dto.jenis_pekerjaan_id.unwrap_or_default());
        self.petugas_pemeriksa_id = dto.petugas_pemeriksa_id.map(KaryawanId);
        self.pengawas_pekerjaan_id = dto.pengawas_pekerjaan_id.map(KaryawanId);
    }

    /// Fills position and company that were left empty from the permit
    /// holder's own position and company.
    pub fn derive_from_holder(
        &mut self,
        holder_jabatan: JabatanId,
        holder_perusahaan: Option<PerusahaanId>,
    ) {
        if self.jabatan_id.is_unsaved() {
            self.jabatan_id = holder_jabatan;
        }
        if self.perusahaan_id.is_unsaved() {
            if let Some(perusahaan_id) = holder_perusahaan {
                self.perusahaan_id = perusahaan_id;
            }
        }
    }

    /// Required fields, reported in form order
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing = [
            ("pemegangIjinId", self.pemegang_ijin_id.is_unsaved()),
            ("jabatanId", self.jabatan_id.is_unsaved()),
            ("departemenId", self.departemen_id.is_unsaved()),
            ("perusahaanId", self.perusahaan_id.is_unsaved()),
            ("jenisPekerjaanId", self.jenis_pekerjaan_id.is_unsaved()),
            ("judulPekerjaan", self.judul_pekerjaan.is_empty()),
        ]
        .into_iter()
        .find(|(_, is_missing)| *is_missing);
        if let Some((field, _)) = missing {
            return Err(DomainError::required(field));
        }
        parse_waktu(&self.waktu)?;
        Ok(())
    }

    pub fn change_status(&mut self, next: PengajuanStatus) -> Result<(), DomainError> {
        self.status.ensure_transition(next)?;
        self.status = next;
        Ok(())
    }

    /// Replaces the team; `statement` is the fitness summary, when there is one.
    ///
    /// A submitted permit whose team has readings becomes examined.
    pub fn replace_team(&mut self, team: Vec<AnggotaTim>, statement: Option<String>) {
        if let Some(statement) = statement {
            self.keterangan = statement;
        }
        if self.status == PengajuanStatus::Diajukan && team.iter().any(AnggotaTim::is_examined) {
            self.status = PengajuanStatus::Diperiksa;
        }
        self.pemeriksaan_fisik = team;
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Accepts `HH:MM` and `HH:MM:SS`
pub fn parse_waktu(waktu: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(waktu, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(waktu, "%H:%M:%S"))
        .map_err(|_| DomainError::invalid(format!("Waktu '{}' harus berformat JJ:MM", waktu)))
}

impl AggregateRoot for Pengajuan {
    type Id = PengajuanId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.nomor_izin_kerja
    }

    fn description(&self) -> &str {
        &self.judul_pekerjaan
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "pengajuan"
    }

    fn element_name() -> &'static str {
        "Pengajuan"
    }

    fn list_name() -> &'static str {
        "Pengajuan Izin Kerja"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Permit form. Used for create and for update; `anggotaTim` replaces the
/// team when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PengajuanDto {
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default)]
    pub waktu: Option<String>,
    #[serde(default)]
    pub lokasi_kerja: Option<String>,
    #[serde(default)]
    pub judul_pekerjaan: Option<String>,
    #[serde(default)]
    pub nomor_izin_kerja: Option<String>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub departemen_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub pemegang_ijin_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub jabatan_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub perusahaan_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub jenis_pekerjaan_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub petugas_pemeriksa_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub pengawas_pekerjaan_id: Option<i32>,
    #[serde(default)]
    pub anggota_tim: Option<Vec<AnggotaTim>>,
}

/// Permit with every relation resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PengajuanView {
    #[serde(flatten)]
    pub pengajuan: Pengajuan,
    pub departemen: Option<NamedRef>,
    pub jabatan: Option<NamedRef>,
    pub perusahaan: Option<NamedRef>,
    pub jenis_pekerjaan: Option<NamedRef>,
    pub pemegang_ijin: Option<NamedRef>,
    pub petugas_pemeriksa: Option<NamedRef>,
    pub pengawas_pekerjaan: Option<NamedRef>,
}

/// Body of the evaluate endpoint; without a team the stored one is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    pub anggota_tim: Option<Vec<AnggotaTim>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn form() -> PengajuanDto {
        serde_json::from_str(
            r#"{
                "tanggal": "",
                "waktu": "",
                "lokasiKerja": "Pit 3",
                "departemenId": "2",
                "judulPekerjaan": "Perbaikan conveyor",
                "nomorIzinKerja": "IK-001",
                "pemegangIjinId": "11",
                "jabatanId": "",
                "perusahaanId": "",
                "jenisPekerjaanId": 4,
                "keterangan": "",
                "petugasPemeriksaId": "",
                "pengawasPekerjaanId": "12"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn new_permit_gets_defaults() {
        let p = Pengajuan::new_for_insert(&form(), today());
        assert_eq!(p.tanggal, today());
        assert_eq!(p.waktu, DEFAULT_WAKTU);
        assert_eq!(p.status, PengajuanStatus::Diajukan);
        assert_eq!(p.petugas_pemeriksa_id, None);
        assert_eq!(p.pengawas_pekerjaan_id, Some(KaryawanId(12)));
    }

    #[test]
    fn missing_position_is_reported_before_derivation() {
        let p = Pengajuan::new_for_insert(&form(), today());
        assert_eq!(p.validate(), Err(DomainError::required("jabatanId")));
    }

    #[test]
    fn holder_fills_position_and_company() {
        let mut p = Pengajuan::new_for_insert(&form(), today());
        p.derive_from_holder(JabatanId(7), Some(PerusahaanId(1)));
        assert_eq!(p.jabatan_id, JabatanId(7));
        assert_eq!(p.perusahaan_id, PerusahaanId(1));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn explicit_position_wins_over_holder() {
        let mut dto = form();
        dto.jabatan_id = Some(3);
        let mut p = Pengajuan::new_for_insert(&dto, today());
        p.derive_from_holder(JabatanId(7), None);
        assert_eq!(p.jabatan_id, JabatanId(3));
        assert_eq!(p.validate(), Err(DomainError::required("perusahaanId")));
    }

    #[test]
    fn waktu_must_be_a_time() {
        let mut dto = form();
        dto.waktu = Some("pagi".into());
        let mut p = Pengajuan::new_for_insert(&dto, today());
        p.derive_from_holder(JabatanId(7), Some(PerusahaanId(1)));
        assert!(matches!(p.validate(), Err(DomainError::Invalid(_))));
    }

    #[test]
    fn examined_team_moves_permit_to_diperiksa() {
        let mut p = Pengajuan::new_for_insert(&form(), today());
        let mut row = AnggotaTim::for_holder(KaryawanId(11), "Budi");
        p.replace_team(vec![row.clone()], None);
        assert_eq!(p.status, PengajuanStatus::Diajukan);

        row.nadi = "80".into();
        p.replace_team(vec![row], Some("Fit bekerja satu (1) karyawan".into()));
        assert_eq!(p.status, PengajuanStatus::Diperiksa);
        assert_eq!(p.keterangan, "Fit bekerja satu (1) karyawan");
    }

    #[test]
    fn written_keterangan_survives_a_team_nobody_passes() {
        use crate::domain::a007_vitals_threshold::aggregate::default_thresholds;
        use crate::domain::a007_vitals_threshold::fitness::{evaluate_team, ThresholdTable};

        let mut dto = form();
        dto.keterangan = Some("Menunggu hasil pemeriksaan ulang".into());
        let mut p = Pengajuan::new_for_insert(&dto, today());

        let mut row = AnggotaTim::for_holder(KaryawanId(11), "Budi");
        row.td = "150/95".into();
        row.nadi = "80".into();
        row.rr = "16".into();
        row.sao2 = "98".into();
        row.suhu = "36.6".into();
        let team = vec![row];

        let table = ThresholdTable::from_thresholds(&default_thresholds());
        let evaluation = evaluate_team(&team, &table);
        assert_eq!(evaluation.fit_count, 0);

        p.replace_team(team, evaluation.statement);
        assert_eq!(p.keterangan, "Menunggu hasil pemeriksaan ulang");
        assert_eq!(p.status, PengajuanStatus::Diperiksa);
    }

    #[test]
    fn team_row_reads_form_json() {
        let row: AnggotaTim = serde_json::from_str(
            r#"{"id": 1712, "karyawanId": "11", "nama": "Budi", "td": "120/80",
                "nadi": 80, "rekomendasi": "Ya"}"#,
        )
        .unwrap();
        assert_eq!(row.karyawan_id, Some(KaryawanId(11)));
        assert_eq!(row.nadi, "80");
        assert_eq!(row.rr, "");
        assert_eq!(row.rekomendasi, Rekomendasi::Ya);
        assert!(row.is_examined());
    }
}
