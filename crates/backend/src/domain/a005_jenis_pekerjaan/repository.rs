use chrono::{DateTime, Utc};
use contracts::domain::a005_jenis_pekerjaan::aggregate::{JenisPekerjaan, JenisPekerjaanId};
use contracts::domain::common::BaseAggregate;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::metadata;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a005_jenis_pekerjaan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kode: String,
    pub nama: String,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for JenisPekerjaan {
    fn from(m: Model) -> Self {
        JenisPekerjaan {
            base: BaseAggregate::with_metadata(
                JenisPekerjaanId(m.id),
                metadata::from_columns(m.created_at, m.updated_at, m.is_deleted, m.version),
            ),
            kode: m.kode,
            nama: m.nama,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<JenisPekerjaan>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Kode)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: JenisPekerjaanId) -> anyhow::Result<Option<JenisPekerjaan>> {
    let result = Entity::find_by_id(id.0)
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_kode(kode: &str) -> anyhow::Result<Option<JenisPekerjaan>> {
    let result = Entity::find()
        .filter(Column::Kode.eq(kode))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &JenisPekerjaan) -> anyhow::Result<JenisPekerjaanId> {
    let meta = &aggregate.base.metadata;
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        kode: Set(aggregate.kode.clone()),
        nama: Set(aggregate.nama.clone()),
        is_deleted: Set(meta.is_deleted),
        created_at: Set(Some(meta.created_at)),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
    };
    let model = active.insert(conn()).await?;
    Ok(JenisPekerjaanId(model.id))
}

pub async fn update(aggregate: &JenisPekerjaan) -> anyhow::Result<()> {
    let meta = &aggregate.base.metadata;
    let active = ActiveModel {
        id: Set(aggregate.base.id.0),
        kode: Set(aggregate.kode.clone()),
        nama: Set(aggregate.nama.clone()),
        is_deleted: Set(meta.is_deleted),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: JenisPekerjaanId) -> anyhow::Result<bool> {
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
