use contracts::domain::a007_vitals_threshold::aggregate::{ThresholdId, VitalsThreshold};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a007_vitals_threshold")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub key: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VitalsThreshold {
    fn from(m: Model) -> Self {
        VitalsThreshold {
            id: ThresholdId(m.id),
            key: m.key,
            label: m.label,
            min: m.min,
            max: m.max,
            unit: m.unit,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<VitalsThreshold>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn get_by_id(id: ThresholdId) -> anyhow::Result<Option<VitalsThreshold>> {
    let result = Entity::find_by_id(id.0).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert_many(items: &[VitalsThreshold]) -> anyhow::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let rows = items.iter().map(|t| ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        key: Set(t.key.clone()),
        label: Set(t.label.clone()),
        min: Set(t.min),
        max: Set(t.max),
        unit: Set(t.unit.clone()),
    });
    Entity::insert_many(rows).exec(conn()).await?;
    Ok(())
}

/// Only the range is ever written back
pub async fn update_range(item: &VitalsThreshold) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(item.id.0),
        min: Set(item.min),
        max: Set(item.max),
        ..Default::default()
    };
    active.update(conn()).await?;
    Ok(())
}
