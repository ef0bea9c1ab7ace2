//! In-memory storage implementation
//!
//! Used for development and tests. Status swaps happen under the entry's
//! shard guard, which gives `compare_and_set_status` the same atomicity the
//! SQL implementation gets from a filtered `UPDATE`.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    Booking, BookingRepository, BookingStatus, DiscountCode, DiscountCodeRepository,
    RepositoryProvider, StayPeriod,
};
use crate::shared::errors::{DomainError, DomainResult};

// ── Bookings ───────────────────────────────────────────────────

pub struct InMemoryBookingRepository {
    bookings: DashMap<String, Booking>,
    /// payment_reference → booking id
    reference_index: DashMap<String, String>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
            reference_index: DashMap::new(),
        }
    }

    fn newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> DomainResult<()> {
        if self.bookings.contains_key(&booking.id) {
            return Err(DomainError::Storage(format!(
                "booking {} already exists",
                booking.id
            )));
        }
        self.reference_index
            .insert(booking.payment_reference.clone(), booking.id.clone());
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn find_by_reference(&self, reference: &str) -> DomainResult<Option<Booking>> {
        let Some(id) = self.reference_index.get(reference).map(|e| e.clone()) else {
            return Ok(None);
        };
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_overlapping(
        &self,
        unit_id: &str,
        period: &StayPeriod,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.unit_id == unit_id && b.is_holding() && b.period.overlaps(period))
            .map(|b| b.clone())
            .collect())
    }

    async fn find_holding_for_unit(&self, unit_id: &str) -> DomainResult<Vec<Booking>> {
        let holding = self
            .bookings
            .iter()
            .filter(|b| b.unit_id == unit_id && b.is_holding())
            .map(|b| b.clone())
            .collect();
        Ok(Self::newest_first(holding))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        Ok(Self::newest_first(
            self.bookings.iter().map(|b| b.clone()).collect(),
        ))
    }

    async fn compare_and_set_status(
        &self,
        reference: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool> {
        let Some(id) = self.reference_index.get(reference).map(|e| e.clone()) else {
            return Ok(false);
        };
        let Some(mut entry) = self.bookings.get_mut(&id) else {
            return Ok(false);
        };
        // The entry guard serializes concurrent swaps on this booking
        if entry.status != from {
            return Ok(false);
        }
        entry.status = to;
        Ok(true)
    }
}

// ── Discount codes ─────────────────────────────────────────────

pub struct InMemoryDiscountCodeRepository {
    codes: DashMap<String, DiscountCode>,
}

impl InMemoryDiscountCodeRepository {
    pub fn new() -> Self {
        Self {
            codes: DashMap::new(),
        }
    }
}

impl Default for InMemoryDiscountCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscountCodeRepository for InMemoryDiscountCodeRepository {
    async fn find_by_code(&self, normalized_code: &str) -> DomainResult<Option<DiscountCode>> {
        Ok(self.codes.get(normalized_code).map(|c| c.clone()))
    }

    async fn save(&self, mut code: DiscountCode) -> DomainResult<()> {
        code.code = DiscountCode::normalize(&code.code);
        self.codes.insert(code.code.clone(), code);
        Ok(())
    }
}

// ── Provider ───────────────────────────────────────────────────

/// In-memory repository provider for development and testing
pub struct InMemoryRepositoryProvider {
    bookings: InMemoryBookingRepository,
    discount_codes: InMemoryDiscountCodeRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            bookings: InMemoryBookingRepository::new(),
            discount_codes: InMemoryDiscountCodeRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn discount_codes(&self) -> &dyn DiscountCodeRepository {
        &self.discount_codes
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::Guest;

    fn period(from_day: u32, to_day: u32) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2024, 3, from_day).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, to_day).unwrap(),
        )
        .unwrap()
    }

    fn sample_booking(unit_id: &str, from_day: u32, to_day: u32) -> Booking {
        Booking::new(
            unit_id,
            Guest {
                user_id: None,
                full_name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                phone: None,
            },
            period(from_day, to_day),
            50_000,
            "NGN",
            None,
        )
    }

    #[tokio::test]
    async fn insert_and_lookup_by_id_and_reference() {
        let repo = InMemoryBookingRepository::new();
        let booking = sample_booking("U1", 1, 5);
        repo.insert(booking.clone()).await.unwrap();

        assert!(repo.find_by_id(&booking.id).await.unwrap().is_some());
        let by_ref = repo
            .find_by_reference(&booking.payment_reference)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_ref.id, booking.id);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let repo = InMemoryBookingRepository::new();
        let booking = sample_booking("U1", 1, 5);
        repo.insert(booking.clone()).await.unwrap();
        assert!(repo.insert(booking).await.is_err());
    }

    #[tokio::test]
    async fn overlap_query_skips_cancelled_and_other_units() {
        let repo = InMemoryBookingRepository::new();

        let mut cancelled = sample_booking("U1", 1, 5);
        cancelled.cancel();
        repo.insert(cancelled).await.unwrap();
        repo.insert(sample_booking("U2", 1, 5)).await.unwrap();

        assert!(repo.find_overlapping("U1", &period(2, 4)).await.unwrap().is_empty());

        repo.insert(sample_booking("U1", 3, 6)).await.unwrap();
        assert_eq!(repo.find_overlapping("U1", &period(2, 4)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cas_succeeds_once_from_the_expected_state() {
        let repo = InMemoryBookingRepository::new();
        let booking = sample_booking("U1", 1, 5);
        repo.insert(booking.clone()).await.unwrap();

        let first = repo
            .compare_and_set_status(
                &booking.payment_reference,
                BookingStatus::Pending,
                BookingStatus::Confirmed,
            )
            .await
            .unwrap();
        let second = repo
            .compare_and_set_status(
                &booking.payment_reference,
                BookingStatus::Pending,
                BookingStatus::Confirmed,
            )
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        let stored = repo.find_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn cas_on_unknown_reference_is_false() {
        let repo = InMemoryBookingRepository::new();
        let swapped = repo
            .compare_and_set_status("PAY-MISSING", BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert!(!swapped);
    }

    #[tokio::test]
    async fn discount_codes_are_stored_normalized() {
        let repo = InMemoryDiscountCodeRepository::new();
        repo.save(DiscountCode {
            code: "  SAVE10 ".into(),
            kind: crate::domain::DiscountKind::Percentage,
            value: 10,
            expires_at: chrono::Utc::now(),
            created_at: chrono::Utc::now(),
        })
        .await
        .unwrap();

        assert!(repo.find_by_code("save10").await.unwrap().is_some());
        assert!(repo.find_by_code("SAVE10").await.unwrap().is_none());
    }
}
