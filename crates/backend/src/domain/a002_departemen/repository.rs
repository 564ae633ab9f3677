use chrono::{DateTime, Utc};
use contracts::domain::a001_perusahaan::aggregate::PerusahaanId;
use contracts::domain::a002_departemen::aggregate::{Departemen, DepartemenId};
use contracts::domain::common::BaseAggregate;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::metadata;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_departemen")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kode: String,
    pub nama: String,
    pub perusahaan_id: i32,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Departemen {
    fn from(m: Model) -> Self {
        Departemen {
            base: BaseAggregate::with_metadata(
                DepartemenId(m.id),
                metadata::from_columns(m.created_at, m.updated_at, m.is_deleted, m.version),
            ),
            kode: m.kode,
            nama: m.nama,
            perusahaan_id: PerusahaanId(m.perusahaan_id),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn live() -> Select<Entity> {
    Entity::find().filter(Column::IsDeleted.eq(false))
}

pub async fn list_all() -> anyhow::Result<Vec<Departemen>> {
    let items = live()
        .order_by_asc(Column::Nama)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_perusahaan(perusahaan_id: PerusahaanId) -> anyhow::Result<Vec<Departemen>> {
    let items = live()
        .filter(Column::PerusahaanId.eq(perusahaan_id.0))
        .order_by_asc(Column::Nama)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn count_by_perusahaan(perusahaan_id: PerusahaanId) -> anyhow::Result<u64> {
    let count = live()
        .filter(Column::PerusahaanId.eq(perusahaan_id.0))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn get_by_id(id: DepartemenId) -> anyhow::Result<Option<Departemen>> {
    let result = live().filter(Column::Id.eq(id.0)).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_kode(kode: &str) -> anyhow::Result<Option<Departemen>> {
    let result = live().filter(Column::Kode.eq(kode)).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Departemen) -> anyhow::Result<DepartemenId> {
    let meta = &aggregate.base.metadata;
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        kode: Set(aggregate.kode.clone()),
        nama: Set(aggregate.nama.clone()),
        perusahaan_id: Set(aggregate.perusahaan_id.0),
        is_deleted: Set(meta.is_deleted),
        created_at: Set(Some(meta.created_at)),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
    };
    let model = active.insert(conn()).await?;
    Ok(DepartemenId(model.id))
}

pub async fn update(aggregate: &Departemen) -> anyhow::Result<()> {
    let meta = &aggregate.base.metadata;
    let active = ActiveModel {
        id: Set(aggregate.base.id.0),
        kode: Set(aggregate.kode.clone()),
        nama: Set(aggregate.nama.clone()),
        perusahaan_id: Set(aggregate.perusahaan_id.0),
        is_deleted: Set(meta.is_deleted),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: DepartemenId) -> anyhow::Result<bool> {
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
