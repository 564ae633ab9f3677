use chrono::{DateTime, Utc};
use contracts::domain::a002_departemen::aggregate::DepartemenId;
use contracts::domain::a003_jabatan::aggregate::{Jabatan, JabatanId};
use contracts::domain::common::BaseAggregate;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::metadata;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_jabatan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kode: String,
    pub nama: String,
    pub departemen_id: i32,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Jabatan {
    fn from(m: Model) -> Self {
        Jabatan {
            base: BaseAggregate::with_metadata(
                JabatanId(m.id),
                metadata::from_columns(m.created_at, m.updated_at, m.is_deleted, m.version),
            ),
            kode: m.kode,
            nama: m.nama,
            departemen_id: DepartemenId(m.departemen_id),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn live() -> Select<Entity> {
    Entity::find().filter(Column::IsDeleted.eq(false))
}

pub async fn list_all() -> anyhow::Result<Vec<Jabatan>> {
    let items = live()
        .order_by_asc(Column::Nama)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_departemen(departemen_id: DepartemenId) -> anyhow::Result<Vec<Jabatan>> {
    let items = live()
        .filter(Column::DepartemenId.eq(departemen_id.0))
        .order_by_asc(Column::Nama)
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

pub async fn get_by_id(id: JabatanId) -> anyhow::Result<Option<Jabatan>> {
    let result = live().filter(Column::Id.eq(id.0)).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_kode(kode: &str) -> anyhow::Result<Option<Jabatan>> {
    let result = live().filter(Column::Kode.eq(kode)).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Jabatan) -> anyhow::Result<JabatanId> {
    let meta = &aggregate.base.metadata;
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        kode: Set(aggregate.kode.clone()),
        nama: Set(aggregate.nama.clone()),
        departemen_id: Set(aggregate.departemen_id.0),
        is_deleted: Set(meta.is_deleted),
        created_at: Set(Some(meta.created_at)),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
    };
    let model = active.insert(conn()).await?;
    Ok(JabatanId(model.id))
}

pub async fn update(aggregate: &Jabatan) -> anyhow::Result<()> {
    let meta = &aggregate.base.metadata;
    let active = ActiveModel {
        id: Set(aggregate.base.id.0),
        kode: Set(aggregate.kode.clone()),
        nama: Set(aggregate.nama.clone()),
        departemen_id: Set(aggregate.departemen_id.0),
        is_deleted: Set(meta.is_deleted),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: JabatanId) -> anyhow::Result<bool> {
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
