use std::collections::HashMap;

use contracts::domain::a003_jabatan::aggregate::JabatanId;
use contracts::domain::a004_karyawan::aggregate::{
    Karyawan, KaryawanDto, KaryawanFilter, KaryawanId, KaryawanListItem,
};
use contracts::domain::common::{AggregateRoot, DomainError, NamedRef};
use contracts::shared::list::Page;

use super::repository;
use crate::domain::{a002_departemen, a003_jabatan, a006_pengajuan};
use crate::shared::logger;

/// Filtered employee page, most recently changed first
pub async fn list(filter: &KaryawanFilter) -> anyhow::Result<Page<KaryawanListItem>> {
    let items: Vec<_> = with_relations(repository::list_all().await?)
        .await?
        .into_iter()
        .filter(|item| filter.matches(item))
        .collect();
    Ok(Page::paginate(items, filter.offset, filter.limit))
}

pub async fn get_by_id(id: KaryawanId) -> anyhow::Result<Option<KaryawanListItem>> {
    match repository::get_by_id(id).await? {
        Some(k) => Ok(with_relations(vec![k]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn require(id: KaryawanId) -> anyhow::Result<Karyawan> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Karyawan::element_name(), id.0).into())
}

/// Short references of all live employees, by id
pub async fn refs() -> anyhow::Result<HashMap<KaryawanId, NamedRef>> {
    Ok(repository::list_all()
        .await?
        .into_iter()
        .map(|k| (k.base.id, k.to_ref()))
        .collect())
}

async fn with_relations(employees: Vec<Karyawan>) -> anyhow::Result<Vec<KaryawanListItem>> {
    let positions: HashMap<JabatanId, NamedRef> = a003_jabatan::repository::list_all()
        .await?
        .into_iter()
        .map(|j| (j.base.id, j.to_ref()))
        .collect();
    let departments = a003_jabatan::service::departemen_refs().await?;

    Ok(employees
        .into_iter()
        .map(|k| KaryawanListItem {
            jabatan: positions.get(&k.jabatan_id).cloned(),
            departemen: departments.get(&k.departemen_id).cloned(),
            karyawan: k,
        })
        .collect())
}

pub async fn create(dto: KaryawanDto) -> anyhow::Result<KaryawanListItem> {
    let mut aggregate = Karyawan::new_for_insert(&dto)?;
    check(&aggregate, None).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    logger::log("karyawan", &format!("Karyawan {} ({}) dibuat", aggregate.nama, aggregate.nrp));
    load(id).await
}

pub async fn update(id: KaryawanId, dto: KaryawanDto) -> anyhow::Result<KaryawanListItem> {
    let mut aggregate = require(id).await?;
    aggregate.update(&dto)?;
    check(&aggregate, Some(id)).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    load(id).await
}

/// Refused while a live permit names the employee
pub async fn delete(id: KaryawanId) -> anyhow::Result<()> {
    require(id).await?;

    let permits = a006_pengajuan::repository::count_referencing_karyawan(id).await?;
    if permits > 0 {
        return Err(DomainError::conflict(format!(
            "Karyawan masih tercantum pada {} pengajuan",
            permits
        ))
        .into());
    }

    repository::soft_delete(id).await?;
    logger::log("karyawan", &format!("Karyawan {} dihapus", id));
    Ok(())
}

pub async fn upsert_by_nrp(dto: KaryawanDto) -> anyhow::Result<KaryawanId> {
    match repository::get_by_nrp(dto.nrp.trim()).await? {
        Some(existing) => {
            let id = existing.base.id;
            update(id, dto).await?;
            Ok(id)
        }
        None => Ok(create(dto).await?.karyawan.base.id),
    }
}

async fn load(id: KaryawanId) -> anyhow::Result<KaryawanListItem> {
    get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Karyawan::element_name(), id.0).into())
}

async fn check(aggregate: &Karyawan, own_id: Option<KaryawanId>) -> anyhow::Result<()> {
    aggregate.validate()?;
    a002_departemen::service::require(aggregate.departemen_id).await?;
    let jabatan = a003_jabatan::service::require(aggregate.jabatan_id).await?;
    aggregate.check_jabatan_departemen(jabatan.departemen_id)?;

    if let Some(other) = repository::get_by_nrp(&aggregate.nrp).await? {
        if Some(other.base.id) != own_id {
            let message = format!("NRP {} sudah dipakai", aggregate.nrp);
            return Err(DomainError::conflict(message).into());
        }
    }
    Ok(())
}
