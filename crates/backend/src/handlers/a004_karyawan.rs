use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a004_karyawan::aggregate::{
    KaryawanDto, KaryawanFilter, KaryawanId, KaryawanListItem,
};
use contracts::shared::list::Page;
use serde_json::{json, Value};

use crate::domain::a004_karyawan;
use crate::shared::api_error::{ApiError, ApiResult};

/// GET /api/karyawan?nama=&jabatan=&departemen=&perusahaan=&status=&limit=&offset=
pub async fn list(Query(filter): Query<KaryawanFilter>) -> ApiResult<Json<Page<KaryawanListItem>>> {
    Ok(Json(a004_karyawan::service::list(&filter).await?))
}

/// GET /api/karyawan/:id
pub async fn get_by_id(Path(id): Path<KaryawanId>) -> ApiResult<Json<KaryawanListItem>> {
    a004_karyawan::service::get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("karyawan", id.0))
}

/// POST /api/karyawan
pub async fn create(Json(dto): Json<KaryawanDto>) -> ApiResult<Json<KaryawanListItem>> {
    Ok(Json(a004_karyawan::service::create(dto).await?))
}

/// PUT /api/karyawan/:id
pub async fn update(
    Path(id): Path<KaryawanId>,
    Json(dto): Json<KaryawanDto>,
) -> ApiResult<Json<KaryawanListItem>> {
    Ok(Json(a004_karyawan::service::update(id, dto).await?))
}

/// DELETE /api/karyawan/:id
pub async fn delete(Path(id): Path<KaryawanId>) -> ApiResult<Json<Value>> {
    a004_karyawan::service::delete(id).await?;
    Ok(Json(json!({ "message": super::DELETED_MESSAGE })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn filter(uri: &str) -> KaryawanFilter {
        let uri: Uri = uri.parse().unwrap();
        Query::<KaryawanFilter>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn empty_picker_query_means_no_filter() {
        let f = filter(
            "/api/karyawan?nama=&jabatan=&departemen=&perusahaan=&status=&limit=&offset=",
        );
        assert_eq!(f.limit, None);
        assert_eq!(f.offset, None);
        assert_eq!(f.nama.as_deref(), Some(""));
    }

    #[test]
    fn paging_values_are_read_from_query() {
        let f = filter("/api/karyawan?nama=budi&limit=20&offset=40");
        assert_eq!(f.nama.as_deref(), Some("budi"));
        assert_eq!(f.limit, Some(20));
        assert_eq!(f.offset, Some(40));
    }
}
