//! SeaORM Entity for exchange_logs table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "exchange_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// UTC midnight of the logged day
    #[sea_orm(unique)]
    pub date: DateTimeUtc,
    pub daily_volume: Decimal,
    /// None means unknown, not zero
    pub daily_volume_excluding_zero_fee: Option<Decimal>,
    pub exchange_id: i32,
    pub price_high: Option<Decimal>,
    pub price_low: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exchanges::Entity",
        from = "Column::ExchangeId",
        to = "super::exchanges::Column::Id",
        on_delete = "Cascade"
    )]
    Exchanges,
}

impl Related<super::exchanges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exchanges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
