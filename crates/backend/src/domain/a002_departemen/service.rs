use std::collections::HashMap;

use contracts::domain::a001_perusahaan::aggregate::PerusahaanId;
use contracts::domain::a002_departemen::aggregate::{
    Departemen, DepartemenDto, DepartemenId, DepartemenListItem, DepartemenQuery,
};
use contracts::domain::common::{AggregateRoot, DomainError, NamedRef};

use super::repository;
use crate::domain::{a001_perusahaan, a003_jabatan, a004_karyawan};
use crate::shared::logger;

/// Departments with their company; `perusahaanId` narrows to one company
pub async fn list(query: &DepartemenQuery) -> anyhow::Result<Vec<DepartemenListItem>> {
    let departments = match query.perusahaan_id {
        Some(id) => repository::list_by_perusahaan(PerusahaanId(id)).await?,
        None => repository::list_all().await?,
    };
    with_perusahaan(departments).await
}

pub async fn get_by_id(id: DepartemenId) -> anyhow::Result<Option<DepartemenListItem>> {
    match repository::get_by_id(id).await? {
        Some(d) => Ok(with_perusahaan(vec![d]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn require(id: DepartemenId) -> anyhow::Result<Departemen> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Departemen::element_name(), id.0).into())
}

/// Embeds the owning company into each department
pub async fn with_perusahaan(
    departments: Vec<Departemen>,
) -> anyhow::Result<Vec<DepartemenListItem>> {
    let companies: HashMap<PerusahaanId, NamedRef> = a001_perusahaan::repository::list_all()
        .await?
        .into_iter()
        .map(|p| (p.base.id, p.to_ref()))
        .collect();

    Ok(departments
        .into_iter()
        .map(|d| DepartemenListItem {
            perusahaan: companies.get(&d.perusahaan_id).cloned(),
            departemen: d,
        })
        .collect())
}

pub async fn create(dto: DepartemenDto) -> anyhow::Result<DepartemenListItem> {
    let mut aggregate = Departemen::new_for_insert(&dto);
    check(&aggregate, None).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    logger::log("departemen", &format!("Departemen {} ({}) dibuat", aggregate.nama, id));
    load(id).await
}

pub async fn update(id: DepartemenId, dto: DepartemenDto) -> anyhow::Result<DepartemenListItem> {
    let mut aggregate = require(id).await?;
    aggregate.update(&dto);
    check(&aggregate, Some(id)).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    load(id).await
}

/// Refused while live positions or employees belong to the department
pub async fn delete(id: DepartemenId) -> anyhow::Result<()> {
    require(id).await?;

    let positions = a003_jabatan::repository::count_by_departemen(id).await?;
    let employees = a004_karyawan::repository::count_by_departemen(id).await?;
    if positions > 0 || employees > 0 {
        return Err(DomainError::conflict(format!(
            "Departemen masih memiliki {} jabatan dan {} karyawan",
            positions, employees
        ))
        .into());
    }

    repository::soft_delete(id).await?;
    logger::log("departemen", &format!("Departemen {} dihapus", id));
    Ok(())
}

pub async fn upsert_by_kode(dto: DepartemenDto) -> anyhow::Result<DepartemenId> {
    match repository::get_by_kode(dto.kode.trim()).await? {
        Some(existing) => {
            let id = existing.base.id;
            update(id, dto).await?;
            Ok(id)
        }
        None => Ok(create(dto).await?.departemen.base.id),
    }
}

async fn load(id: DepartemenId) -> anyhow::Result<DepartemenListItem> {
    get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Departemen::element_name(), id.0).into())
}

async fn check(aggregate: &Departemen, own_id: Option<DepartemenId>) -> anyhow::Result<()> {
    aggregate.validate()?;
    a001_perusahaan::service::require(aggregate.perusahaan_id).await?;

    if let Some(other) = repository::get_by_kode(&aggregate.kode).await? {
        if Some(other.base.id) != own_id {
            return Err(DomainError::conflict(format!(
                "Kode departemen {} sudah dipakai",
                aggregate.kode
            ))
            .into());
        }
    }
    Ok(())
}
