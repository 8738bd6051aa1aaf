use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exchanges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exchanges::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Exchanges::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Exchanges::Ticker)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Exchanges::TokenAddress)
                            .string_len(42) // 0x-prefixed address
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Exchanges::TokenCap)
                            .decimal() // numeric in PostgreSQL
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Exchanges::TokenSupply)
                            .decimal()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exchanges::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Exchanges {
    Table,
    Id,
    Name,
    Ticker,
    TokenAddress,
    TokenCap,
    TokenSupply,
}
