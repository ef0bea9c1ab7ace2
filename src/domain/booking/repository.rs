//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingStatus, StayPeriod};
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking
    async fn insert(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Find booking by its external payment reference
    async fn find_by_reference(&self, reference: &str) -> DomainResult<Option<Booking>>;

    /// Find all holding (Pending or Confirmed) bookings for a unit whose
    /// period intersects `period` under the closed-open overlap test.
    async fn find_overlapping(
        &self,
        unit_id: &str,
        period: &StayPeriod,
    ) -> DomainResult<Vec<Booking>>;

    /// All holding bookings for a unit, newest first (dashboard view)
    async fn find_holding_for_unit(&self, unit_id: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings, any status, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Atomically transition the booking with `reference` from `from` to
    /// `to`. Returns `true` only when the caller's compare succeeded; a
    /// `false` return means another call already moved the booking out of
    /// `from`, which is how idempotent confirmation detects lost races.
    async fn compare_and_set_status(
        &self,
        reference: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool>;
}
