use contracts::domain::a005_jenis_pekerjaan::aggregate::{
    JenisPekerjaan, JenisPekerjaanDto, JenisPekerjaanId,
};
use contracts::domain::common::{AggregateRoot, DomainError};

use super::repository;
use crate::domain::a006_pengajuan;
use crate::shared::logger;

pub async fn list_all() -> anyhow::Result<Vec<JenisPekerjaan>> {
    repository::list_all().await
}

pub async fn get_by_id(id: JenisPekerjaanId) -> anyhow::Result<Option<JenisPekerjaan>> {
    repository::get_by_id(id).await
}

pub async fn require(id: JenisPekerjaanId) -> anyhow::Result<JenisPekerjaan> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(JenisPekerjaan::element_name(), id.0).into())
}

pub async fn create(dto: JenisPekerjaanDto) -> anyhow::Result<JenisPekerjaan> {
    let mut aggregate = JenisPekerjaan::new_for_insert(&dto);
    aggregate.validate()?;
    ensure_kode_free(&aggregate.kode, None).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;

    logger::log("jenis_pekerjaan", &format!("Jenis pekerjaan {} dibuat", aggregate.kode));
    require(id).await
}

pub async fn update(
    id: JenisPekerjaanId,
    dto: JenisPekerjaanDto,
) -> anyhow::Result<JenisPekerjaan> {
    let mut aggregate = require(id).await?;
    aggregate.update(&dto);
    aggregate.validate()?;
    ensure_kode_free(&aggregate.kode, Some(id)).await?;

    aggregate.before_write();
    aggregate.base.metadata.increment_version();
    repository::update(&aggregate).await?;
    require(id).await
}

/// Refused while a live permit uses the job type
pub async fn delete(id: JenisPekerjaanId) -> anyhow::Result<()> {
    require(id).await?;

    let permits = a006_pengajuan::repository::count_by_jenis_pekerjaan(id).await?;
    if permits > 0 {
        return Err(DomainError::conflict(format!(
            "Jenis pekerjaan masih dipakai oleh {} pengajuan",
            permits
        ))
        .into());
    }

    repository::soft_delete(id).await?;
    logger::log("jenis_pekerjaan", &format!("Jenis pekerjaan {} dihapus", id));
    Ok(())
}

pub async fn upsert_by_kode(dto: JenisPekerjaanDto) -> anyhow::Result<JenisPekerjaanId> {
    match repository::get_by_kode(dto.kode.trim()).await? {
        Some(existing) => {
            let id = existing.base.id;
            update(id, dto).await?;
            Ok(id)
        }
        None => Ok(create(dto).await?.base.id),
    }
}

async fn ensure_kode_free(kode: &str, own_id: Option<JenisPekerjaanId>) -> anyhow::Result<()> {
    if let Some(other) = repository::get_by_kode(kode).await? {
        if Some(other.base.id) != own_id {
            return Err(DomainError::conflict(format!(
                "Kode jenis pekerjaan {} sudah dipakai",
                kode
            ))
            .into());
        }
    }
    Ok(())
}
