//! SeaORM Entity for exchanges table
//!
//! Provisioned externally; this crate only reads it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "exchanges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Join key for the daily logs lookup
    #[sea_orm(unique)]
    pub name: String,
    /// Public lookup key (e.g. "LOOKS")
    #[sea_orm(unique)]
    pub ticker: String,
    pub token_address: String,
    pub token_cap: Decimal,
    pub token_supply: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exchange_logs::Entity")]
    ExchangeLogs,
}

impl Related<super::exchange_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExchangeLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
