use std::collections::HashMap;

use contracts::domain::a002_departemen::aggregate::{DepartemenId, DepartemenRef};
use contracts::domain::a003_jabatan::aggregate::{
    Jabatan, JabatanDto, JabatanId, JabatanListItem, JabatanQuery,
};
use contracts::domain::common::{AggregateRoot, DomainError};

use super::repository;
use crate::domain::{a002_departemen, a004_karyawan};
use crate::shared::logger;

/// Positions with department and company; `departemenId` narrows to one department
pub async fn list(query: &JabatanQuery) -> anyhow::Result<Vec<JabatanListItem>> {
    let positions = match query.departemen_id {
        Some(id) => repository::list_by_departemen(DepartemenId(id)).await?,
        None => repository::list_all().await?,
    };
    with_departemen(positions).await
}

pub async fn get_by_id(id: JabatanId) -> anyhow::Result<Option<JabatanListItem>> {
    match repository::get_by_id(id).await? {
        Some(j) => Ok(with_departemen(vec![j]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn require(id: JabatanId) -> anyhow::Result<Jabatan> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Jabatan::element_name(), id.0).into())
}

/// Department references (with company) of all live departments, by id
pub async fn departemen_refs() -> anyhow::Result<HashMap<DepartemenId, DepartemenRef>> {
    let departments = a002_departemen::repository::list_all().await?;
    Ok(a002_departemen::service::with_perusahaan(departments)
        .await?
        .into_iter()
        .map(|d| (d.departemen.base.id, d.to_ref()))
        .collect())
}

async fn with_departemen(positions: Vec<Jabatan>) -> anyhow::Result<Vec<JabatanListItem>> {
    let departments = departemen_refs().await?;
    Ok(positions
        .into_iter()
        .map(|j| JabatanListItem {
            departemen: departments.get(&j.departemen_id).cloned(),
            jabatan: j,
        })
        .collect())
}

pub async fn create(dto: JabatanDto) -> anyhow::Result<JabatanListItem> {
    let mut aggregate = Jabatan::new_for_insert(&dto);
    check(&aggregate, None).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    logger::log("jabatan", &format!("Jabatan {} ({}) dibuat", aggregate.nama, id));
    load(id).await
}

pub async fn update(id: JabatanId, dto: JabatanDto) -> anyhow::Result<JabatanListItem> {
    let mut aggregate = require(id).await?;
    aggregate.update(&dto);
    check(&aggregate, Some(id)).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    load(id).await
}

/// Refused while live employees hold the position
pub async fn delete(id: JabatanId) -> anyhow::Result<()> {
    require(id).await?;

    let employees = a004_karyawan::repository::count_by_jabatan(id).await?;
    if employees > 0 {
        return Err(DomainError::conflict(format!(
            "Jabatan masih dipakai oleh {} karyawan",
            employees
        ))
        .into());
    }

    repository::soft_delete(id).await?;
    logger::log("jabatan", &format!("Jabatan {} dihapus", id));
    Ok(())
}

pub async fn upsert_by_kode(dto: JabatanDto) -> anyhow::Result<JabatanId> {
    match repository::get_by_kode(dto.kode.trim()).await? {
        Some(existing) => {
            let id = existing.base.id;
            update(id, dto).await?;
            Ok(id)
        }
        None => Ok(create(dto).await?.jabatan.base.id),
    }
}

async fn load(id: JabatanId) -> anyhow::Result<JabatanListItem> {
    get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(Jabatan::element_name(), id.0).into())
}

async fn check(aggregate: &Jabatan, own_id: Option<JabatanId>) -> anyhow::Result<()> {
    aggregate.validate()?;
    a002_departemen::service::require(aggregate.departemen_id).await?;

    if let Some(other) = repository::get_by_kode(&aggregate.kode).await? {
        if Some(other.base.id) != own_id {
            return Err(DomainError::conflict(format!(
                "Kode jabatan {} sudah dipakai",
                aggregate.kode
            ))
            .into());
        }
    }
    Ok(())
}
