//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{BookingRepository, DiscountCodeRepository, RepositoryProvider};

use super::booking_repository::SeaOrmBookingRepository;
use super::discount_code_repository::SeaOrmDiscountCodeRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let booking = repos.bookings().find_by_reference("PAY-...").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    discount_codes: SeaOrmDiscountCodeRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone()),
            discount_codes: SeaOrmDiscountCodeRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn discount_codes(&self) -> &dyn DiscountCodeRepository {
        &self.discount_codes
    }
}
