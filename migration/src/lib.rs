pub use sea_orm_migration::prelude::*;

mod m20220110_000001_create_exchanges;
mod m20220110_000002_create_exchange_logs;
mod m20220301_000001_create_sync_status;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220110_000001_create_exchanges::Migration),
            Box::new(m20220110_000002_create_exchange_logs::Migration),
            Box::new(m20220301_000001_create_sync_status::Migration),
        ]
    }
}
