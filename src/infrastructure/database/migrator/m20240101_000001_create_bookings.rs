//! Create bookings table
//!
//! Stores unit bookings with half-open stay intervals and the external
//! payment reference used by both reconciliation paths. The unique index
//! on `payment_reference` backs reference lookups from webhook handling.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::UnitId).string().not_null())
                    .col(ColumnDef::new(Bookings::GuestUserId).string())
                    .col(ColumnDef::new(Bookings::GuestName).string().not_null())
                    .col(ColumnDef::new(Bookings::GuestEmail).string().not_null())
                    .col(ColumnDef::new(Bookings::GuestPhone).string())
                    .col(ColumnDef::new(Bookings::CheckIn).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckOut).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::TotalAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::Currency).string().not_null())
                    .col(ColumnDef::new(Bookings::DiscountCode).string())
                    .col(ColumnDef::new(Bookings::DiscountKind).string())
                    .col(ColumnDef::new(Bookings::DiscountValue).big_integer())
                    .col(ColumnDef::new(Bookings::DiscountAmountOff).big_integer())
                    .col(
                        ColumnDef::new(Bookings::PaymentReference)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_unit")
                    .table(Bookings::Table)
                    .col(Bookings::UnitId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_reference")
                    .table(Bookings::Table)
                    .col(Bookings::PaymentReference)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    UnitId,
    GuestUserId,
    GuestName,
    GuestEmail,
    GuestPhone,
    CheckIn,
    CheckOut,
    TotalAmount,
    Currency,
    DiscountCode,
    DiscountKind,
    DiscountValue,
    DiscountAmountOff,
    PaymentReference,
    Status,
    CreatedAt,
}
