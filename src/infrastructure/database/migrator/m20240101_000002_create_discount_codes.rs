//! Create discount_codes table
//!
//! Codes are stored pre-normalized (lowercase, trimmed); the primary key
//! doubles as the lookup index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscountCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountCodes::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DiscountCodes::Kind).string().not_null())
                    .col(
                        ColumnDef::new(DiscountCodes::Value)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscountCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscountCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DiscountCodes {
    Table,
    Code,
    Kind,
    Value,
    ExpiresAt,
    CreatedAt,
}
