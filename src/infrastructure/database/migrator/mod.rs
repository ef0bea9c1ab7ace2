//! Database migrations

pub mod m20240101_000001_create_bookings;
pub mod m20240101_000002_create_discount_codes;

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_bookings::Migration),
            Box::new(m20240101_000002_create_discount_codes::Migration),
        ]
    }
}
