use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per calendar day; `date` is the update key for the price backfill
        manager
            .create_table(
                Table::create()
                    .table(ExchangeLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExchangeLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExchangeLogs::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ExchangeLogs::DailyVolume)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExchangeLogs::DailyVolumeExcludingZeroFee)
                            .decimal()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExchangeLogs::ExchangeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExchangeLogs::PriceHigh).decimal().null())
                    .col(ColumnDef::new(ExchangeLogs::PriceLow).decimal().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exchange_logs_exchange_id")
                            .from(ExchangeLogs::Table, ExchangeLogs::ExchangeId)
                            .to(Exchanges::Table, Exchanges::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exchange_logs_exchange_id")
                    .table(ExchangeLogs::Table)
                    .col(ExchangeLogs::ExchangeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExchangeLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ExchangeLogs {
    Table,
    Id,
    Date,
    DailyVolume,
    DailyVolumeExcludingZeroFee,
    ExchangeId,
    PriceHigh,
    PriceLow,
}

#[derive(Iden)]
enum Exchanges {
    Table,
    Id,
}
