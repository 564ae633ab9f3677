use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a002_departemen::aggregate::DepartemenId;
use contracts::domain::a003_jabatan::aggregate::JabatanId;
use contracts::domain::a004_karyawan::aggregate::{Karyawan, KaryawanId, KaryawanStatus};
use contracts::domain::common::BaseAggregate;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::metadata;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_karyawan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nrp: String,
    pub nrp_bib: Option<String>,
    pub nama: String,
    pub telepon: Option<String>,
    pub status: String,
    pub departemen_id: i32,
    pub jabatan_id: i32,
    pub tanggal_lahir: Option<NaiveDate>,
    pub tanggal_masuk: Option<NaiveDate>,
    pub tinggi_badan: Option<f64>,
    pub berat_badan: Option<f64>,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Karyawan {
    fn from(m: Model) -> Self {
        let status = KaryawanStatus::parse(&m.status).unwrap_or_else(|_| {
            tracing::warn!("Karyawan {} has unknown status {:?}", m.id, m.status);
            KaryawanStatus::default()
        });
        Karyawan {
            base: BaseAggregate::with_metadata(
                KaryawanId(m.id),
                metadata::from_columns(m.created_at, m.updated_at, m.is_deleted, m.version),
            ),
            nrp: m.nrp,
            nrp_bib: m.nrp_bib,
            nama: m.nama,
            telepon: m.telepon,
            status,
            departemen_id: DepartemenId(m.departemen_id),
            jabatan_id: JabatanId(m.jabatan_id),
            tanggal_lahir: m.tanggal_lahir,
            tanggal_masuk: m.tanggal_masuk,
            tinggi_badan: m.tinggi_badan,
            berat_badan: m.berat_badan,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn live() -> Select<Entity> {
    Entity::find().filter(Column::IsDeleted.eq(false))
}

/// Most recently changed first
pub async fn list_all() -> anyhow::Result<Vec<Karyawan>> {
    let items = live()
        .order_by_desc(Column::UpdatedAt)
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn count_by_departemen(departemen_id: DepartemenId) -> anyhow::Result<u64> {
    let count = live()
        .filter(Column::DepartemenId.eq(departemen_id.0))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn count_by_jabatan(jabatan_id: JabatanId) -> anyhow::Result<u64> {
    let count = live()
        .filter(Column::JabatanId.eq(jabatan_id.0))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn get_by_id(id: KaryawanId) -> anyhow::Result<Option<Karyawan>> {
    let result = live().filter(Column::Id.eq(id.0)).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_nrp(nrp: &str) -> anyhow::Result<Option<Karyawan>> {
    let result = live().filter(Column::Nrp.eq(nrp)).one(conn()).await?;
    Ok(result.map(Into::into))
}

fn to_active(aggregate: &Karyawan) -> ActiveModel {
    let meta = &aggregate.base.metadata;
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        nrp: Set(aggregate.nrp.clone()),
        nrp_bib: Set(aggregate.nrp_bib.clone()),
        nama: Set(aggregate.nama.clone()),
        telepon: Set(aggregate.telepon.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        departemen_id: Set(aggregate.departemen_id.0),
        jabatan_id: Set(aggregate.jabatan_id.0),
        tanggal_lahir: Set(aggregate.tanggal_lahir),
        tanggal_masuk: Set(aggregate.tanggal_masuk),
        tinggi_badan: Set(aggregate.tinggi_badan),
        berat_badan: Set(aggregate.berat_badan),
        is_deleted: Set(meta.is_deleted),
        created_at: Set(Some(meta.created_at)),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
    }
}

pub async fn insert(aggregate: &Karyawan) -> anyhow::Result<KaryawanId> {
    let model = to_active(aggregate).insert(conn()).await?;
    Ok(KaryawanId(model.id))
}

pub async fn update(aggregate: &Karyawan) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.id = Set(aggregate.base.id.0);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: KaryawanId) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.0))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
