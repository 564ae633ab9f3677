use std::collections::HashMap;

use contracts::domain::a001_perusahaan::aggregate::{
    Perusahaan, PerusahaanDto, PerusahaanId, PerusahaanListItem,
};
use contracts::domain::common::{AggregateRoot, DomainError, NamedRef};

use super::repository;
use crate::domain::a002_departemen;
use crate::shared::logger;

/// Company list, each with its departments
pub async fn list_all() -> anyhow::Result<Vec<PerusahaanListItem>> {
    let companies = repository::list_all().await?;

    let mut departments: HashMap<PerusahaanId, Vec<NamedRef>> = HashMap::new();
    for d in a002_departemen::repository::list_all().await? {
        departments.entry(d.perusahaan_id).or_default().push(d.to_ref());
    }

    Ok(companies
        .into_iter()
        .map(|p| PerusahaanListItem {
            departemen: departments.remove(&p.base.id).unwrap_or_default(),
            perusahaan: p,
        })
        .collect())
}

pub async fn get_by_id(id: PerusahaanId) -> anyhow::Result<Option<Perusahaan>> {
    repository::get_by_id(id).await
}

/// Like [`get_by_id`], but a missing row is a `NotFound` error
pub async fn require(id: PerusahaanId) -> anyhow::Result<Perusahaan> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Perusahaan::element_name(), id.0).into())
}

pub async fn create(dto: PerusahaanDto) -> anyhow::Result<Perusahaan> {
    let mut aggregate = Perusahaan::new_for_insert(&dto);
    aggregate.validate()?;
    ensure_kode_free(&aggregate.kode, None).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    logger::log("perusahaan", &format!("Perusahaan {} ({}) dibuat", aggregate.nama, id));
    require(id).await
}

pub async fn update(id: PerusahaanId, dto: PerusahaanDto) -> anyhow::Result<Perusahaan> {
    let mut aggregate = require(id).await?;
    aggregate.update(&dto);
    aggregate.validate()?;
    ensure_kode_free(&aggregate.kode, Some(id)).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    require(id).await
}

/// Soft delete; refused while live departments still point at the company
pub async fn delete(id: PerusahaanId) -> anyhow::Result<()> {
    require(id).await?;

    let departments = a002_departemen::repository::count_by_perusahaan(id).await?;
    if departments > 0 {
        return Err(DomainError::conflict(format!(
            "Perusahaan masih memiliki {} departemen",
            departments
        ))
        .into());
    }

    repository::soft_delete(id).await?;
    logger::log("perusahaan", &format!("Perusahaan {} dihapus", id));
    Ok(())
}

/// Create or update the live company with the same kode
pub async fn upsert_by_kode(dto: PerusahaanDto) -> anyhow::Result<PerusahaanId> {
    match repository::get_by_kode(dto.kode.trim()).await? {
        Some(existing) => {
            let id = existing.base.id;
            update(id, dto).await?;
            Ok(id)
        }
        None => Ok(create(dto).await?.base.id),
    }
}

async fn ensure_kode_free(kode: &str, own_id: Option<PerusahaanId>) -> anyhow::Result<()> {
    if let Some(other) = repository::get_by_kode(kode).await? {
        if Some(other.base.id) != own_id {
            let message = format!("Kode perusahaan {} sudah dipakai", kode);
            return Err(DomainError::conflict(message).into());
        }
    }
    Ok(())
}
