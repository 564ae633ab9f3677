use std::collections::HashMap;

use chrono::Local;
use contracts::domain::a001_perusahaan::aggregate::PerusahaanId;
use contracts::domain::a002_departemen::aggregate::DepartemenId;
use contracts::domain::a003_jabatan::aggregate::JabatanId;
use contracts::domain::a004_karyawan::aggregate::{Karyawan, KaryawanId};
use contracts::domain::a005_jenis_pekerjaan::aggregate::JenisPekerjaanId;
use contracts::domain::a006_pengajuan::aggregate::{
    AnggotaTim, EvaluateRequest, Pengajuan, PengajuanDto, PengajuanId, PengajuanView,
};
use contracts::domain::a006_pengajuan::roster;
use contracts::domain::a006_pengajuan::status::PengajuanStatus;
use contracts::domain::a007_vitals_threshold::fitness::{self, TeamEvaluation};
use contracts::domain::common::{AggregateRoot, DomainError, NamedRef};

use super::repository;
use crate::domain::{
    a001_perusahaan, a002_departemen, a003_jabatan, a004_karyawan, a005_jenis_pekerjaan,
    a007_vitals_threshold,
};
use crate::shared::logger;

/// Name lookups for every relation of a permit
struct Relations {
    departemen: HashMap<DepartemenId, NamedRef>,
    jabatan: HashMap<JabatanId, NamedRef>,
    perusahaan: HashMap<PerusahaanId, NamedRef>,
    jenis_pekerjaan: HashMap<JenisPekerjaanId, NamedRef>,
    karyawan: HashMap<KaryawanId, NamedRef>,
}

impl Relations {
    async fn load() -> anyhow::Result<Self> {
        Ok(Self {
            departemen: a002_departemen::repository::list_all()
                .await?
                .into_iter()
                .map(|d| (d.base.id, d.to_ref()))
                .collect(),
            jabatan: a003_jabatan::repository::list_all()
                .await?
                .into_iter()
                .map(|j| (j.base.id, j.to_ref()))
                .collect(),
            perusahaan: a001_perusahaan::repository::list_all()
                .await?
                .into_iter()
                .map(|p| (p.base.id, p.to_ref()))
                .collect(),
            jenis_pekerjaan: a005_jenis_pekerjaan::repository::list_all()
                .await?
                .into_iter()
                .map(|j| (j.base.id, j.to_ref()))
                .collect(),
            karyawan: a004_karyawan::service::refs().await?,
        })
    }

    fn employee(&self, id: Option<KaryawanId>) -> Option<NamedRef> {
        id.and_then(|id| self.karyawan.get(&id).cloned())
    }

    fn view(&self, pengajuan: Pengajuan) -> PengajuanView {
        PengajuanView {
            departemen: self.departemen.get(&pengajuan.departemen_id).cloned(),
            jabatan: self.jabatan.get(&pengajuan.jabatan_id).cloned(),
            perusahaan: self.perusahaan.get(&pengajuan.perusahaan_id).cloned(),
            jenis_pekerjaan: self.jenis_pekerjaan.get(&pengajuan.jenis_pekerjaan_id).cloned(),
            pemegang_ijin: self.employee(Some(pengajuan.pemegang_ijin_id)),
            petugas_pemeriksa: self.employee(pengajuan.petugas_pemeriksa_id),
            pengawas_pekerjaan: self.employee(pengajuan.pengawas_pekerjaan_id),
            pengajuan,
        }
    }
}

pub async fn list_all() -> anyhow::Result<Vec<PengajuanView>> {
    let relations = Relations::load().await?;
    Ok(repository::list_all()
        .await?
        .into_iter()
        .map(|p| relations.view(p))
        .collect())
}

/// Permit with relations and team
pub async fn get_by_id(id: PengajuanId) -> anyhow::Result<Option<PengajuanView>> {
    match repository::get_by_id(id).await? {
        Some(p) => Ok(Some(Relations::load().await?.view(p))),
        None => Ok(None),
    }
}

async fn require(id: PengajuanId) -> anyhow::Result<Pengajuan> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Pengajuan::element_name(), id.0).into())
}

async fn load(id: PengajuanId) -> anyhow::Result<PengajuanView> {
    get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Pengajuan::element_name(), id.0).into())
}

/// New permit; position and company default to the holder's.
/// The team starts with the holder alone.
pub async fn create(dto: PengajuanDto) -> anyhow::Result<PengajuanView> {
    let mut aggregate = Pengajuan::new_for_insert(&dto, Local::now().date_naive());
    let holder = derive_from_holder(&mut aggregate).await?;
    aggregate.validate()?;
    check_references(&aggregate).await?;

    if let Some(status) = requested_status(&dto)? {
        aggregate.change_status(status)?;
    }
    if let Some(holder) = holder {
        aggregate.pemeriksaan_fisik = roster::initial_team(holder.base.id, &holder.nama);
    }

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    logger::log(
        "pengajuan",
        &format!("Pengajuan {} ({}) dibuat", id, aggregate.judul_pekerjaan),
    );
    load(id).await
}

/// Full form update. With `anggotaTim` the team is replaced, re-evaluated
/// and the fitness statement written into `keterangan`.
pub async fn update(id: PengajuanId, dto: PengajuanDto) -> anyhow::Result<PengajuanView> {
    let mut aggregate = require(id).await?;
    let previous_holder = aggregate.pemegang_ijin_id;

    aggregate.apply_header(&dto);
    let holder = derive_from_holder(&mut aggregate).await?;
    aggregate.validate()?;
    check_references(&aggregate).await?;

    if let Some(status) = requested_status(&dto)? {
        aggregate.change_status(status)?;
    }

    let holder = holder.ok_or_else(|| DomainError::required("pemegangIjinId"))?;
    let team_rows = match dto.anggota_tim {
        Some(rows) => Some(rows),
        None if holder.base.id != previous_holder => Some(aggregate.pemeriksaan_fisik.clone()),
        None => None,
    };

    if let Some(rows) = team_rows {
        let names = a004_karyawan::service::refs().await?;
        let team = roster::normalize_team(rows, holder.base.id, &holder.nama, |kid| {
            names.get(&kid).map(|r| r.nama.clone())
        })?;
        let thresholds = a007_vitals_threshold::service::table().await?;
        let evaluation = fitness::evaluate_team(&team, &thresholds);
        tracing::info!(
            "Pengajuan {}: {} of {} team members fit",
            id,
            evaluation.fit_count,
            evaluation.total
        );
        aggregate.replace_team(team, evaluation.statement);
    }

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    load(id).await
}

/// Fitness of the stored team, or of the team in the request, without saving
pub async fn evaluate(id: PengajuanId, request: EvaluateRequest) -> anyhow::Result<TeamEvaluation> {
    let aggregate = require(id).await?;
    let team: Vec<AnggotaTim> = request.anggota_tim.unwrap_or(aggregate.pemeriksaan_fisik);
    let table = a007_vitals_threshold::service::table().await?;
    Ok(fitness::evaluate_team(&team, &table))
}

pub async fn delete(id: PengajuanId) -> anyhow::Result<()> {
    if !repository::soft_delete(id).await? {
        return Err(DomainError::not_found(Pengajuan::element_name(), id.0).into());
    }
    logger::log("pengajuan", &format!("Pengajuan {} dihapus", id));
    Ok(())
}

fn requested_status(dto: &PengajuanDto) -> Result<Option<PengajuanStatus>, DomainError> {
    match dto.status.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => PengajuanStatus::parse(s).map(Some),
    }
}

/// Loads the holder (when set) and fills position and company from it
async fn derive_from_holder(aggregate: &mut Pengajuan) -> anyhow::Result<Option<Karyawan>> {
    if aggregate.pemegang_ijin_id.is_unsaved() {
        return Ok(None);
    }
    let holder = a004_karyawan::service::require(aggregate.pemegang_ijin_id).await?;
    let holder_perusahaan = a002_departemen::repository::get_by_id(holder.departemen_id)
        .await?
        .map(|d| d.perusahaan_id);
    aggregate.derive_from_holder(holder.jabatan_id, holder_perusahaan);
    Ok(Some(holder))
}

async fn check_references(aggregate: &Pengajuan) -> anyhow::Result<()> {
    a002_departemen::service::require(aggregate.departemen_id).await?;
    a003_jabatan::service::require(aggregate.jabatan_id).await?;
    a001_perusahaan::service::require(aggregate.perusahaan_id).await?;
    a005_jenis_pekerjaan::service::require(aggregate.jenis_pekerjaan_id).await?;
    for id in [aggregate.petugas_pemeriksa_id, aggregate.pengawas_pekerjaan_id]
        .into_iter()
        .flatten()
    {
        a004_karyawan::service::require(id).await?;
    }
    Ok(())
}
