//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;

use crate::domain::discount::AppliedDiscount;
use crate::shared::errors::{DomainError, DomainResult};

/// Prefix for externally visible payment references
const PAYMENT_REFERENCE_PREFIX: &str = "PAY-";

/// Booking status
///
/// `Pending` and `Confirmed` are "holding" states: they occupy the unit's
/// calendar and participate in overlap checks. `Cancelled` bookings are kept
/// for audit only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created by admission, payment not yet reconciled
    Pending,
    /// Payment reconciled; terminal for payment transitions
    Confirmed,
    /// Cancelled before payment; terminal
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Confirmed" => Self::Confirmed,
            _ => Self::Cancelled,
        }
    }

    /// Whether this status occupies the unit's calendar
    pub fn is_holding(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open stay interval: nights `[check_in, check_out)`.
///
/// The check-out date is not a booked night, so a stay ending on a given day
/// never conflicts with a stay starting that same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Build a period, rejecting empty or inverted intervals.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::Validation(format!(
                "check_out ({}) must be after check_in ({})",
                check_out, check_in
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of booked nights
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Closed-open intersection test: `[a,b)` and `[c,d)` overlap
    /// iff `a < d && c < b`.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl std::fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

/// Guest identity attached to a booking.
///
/// Either a registered user (by id) or a contact captured at checkout;
/// both carry the contact fields used for the invoice email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    /// Registered user id, if the guest was signed in
    pub user_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A claim on a unit for a half-open date interval
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: String,
    /// Bookable unit (apartment/listing) ID
    pub unit_id: String,
    /// Guest identity
    pub guest: Guest,
    /// Booked nights
    pub period: StayPeriod,
    /// Total chargeable amount in minor currency units, after discount
    pub total_amount: i64,
    /// Currency code (ISO 4217)
    pub currency: String,
    /// Discount applied at admission, kept for audit
    pub discount: Option<AppliedDiscount>,
    /// External payment reference, unique per booking, assigned at creation
    pub payment_reference: String,
    /// Current status
    pub status: BookingStatus,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new pending booking with a fresh id and payment reference.
    pub fn new(
        unit_id: impl Into<String>,
        guest: Guest,
        period: StayPeriod,
        total_amount: i64,
        currency: impl Into<String>,
        discount: Option<AppliedDiscount>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            unit_id: unit_id.into(),
            guest,
            period,
            total_amount,
            currency: currency.into(),
            discount,
            payment_reference: generate_payment_reference(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Whether this booking occupies the unit's calendar
    pub fn is_holding(&self) -> bool {
        self.status.is_holding()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Mark as confirmed (payment reconciled)
    pub fn confirm(&mut self) {
        self.status = BookingStatus::Confirmed;
    }

    /// Cancel this booking
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }
}

/// Generate a payment reference to hand to the payment provider.
///
/// Format: `PAY-<24 hex chars>`, unique per booking.
pub fn generate_payment_reference() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 12] = rng.gen();
    format!(
        "{}{}",
        PAYMENT_REFERENCE_PREFIX,
        hex::encode(random_bytes).to_uppercase()
    )
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(a: NaiveDate, b: NaiveDate) -> StayPeriod {
        StayPeriod::new(a, b).unwrap()
    }

    fn sample_guest() -> Guest {
        Guest {
            user_id: Some("user-1".into()),
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
        }
    }

    fn sample_booking() -> Booking {
        Booking::new(
            "U1",
            sample_guest(),
            period(date(2024, 3, 1), date(2024, 3, 5)),
            50_000,
            "NGN",
            None,
        )
    }

    #[test]
    fn rejects_empty_interval() {
        let d = date(2024, 3, 1);
        assert!(matches!(
            StayPeriod::new(d, d),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rejects_inverted_interval() {
        assert!(StayPeriod::new(date(2024, 3, 5), date(2024, 3, 1)).is_err());
    }

    #[test]
    fn nights_counts_half_open() {
        let p = period(date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(p.nights(), 4);
    }

    #[test]
    fn overlap_detects_partial_intersection() {
        let a = period(date(2024, 3, 1), date(2024, 3, 5));
        let b = period(date(2024, 3, 4), date(2024, 3, 6));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn overlap_detects_containment() {
        let outer = period(date(2024, 3, 1), date(2024, 3, 10));
        let inner = period(date(2024, 3, 4), date(2024, 3, 6));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        // check-out day equals check-in day of the next stay
        let a = period(date(2024, 3, 1), date(2024, 3, 5));
        let b = period(date(2024, 3, 5), date(2024, 3, 8));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        let a = period(date(2024, 3, 1), date(2024, 3, 5));
        let b = period(date(2024, 4, 1), date(2024, 4, 5));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn new_booking_is_pending_and_holding() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert!(b.is_holding());
        assert!(!b.is_confirmed());
    }

    #[test]
    fn confirm_sets_confirmed() {
        let mut b = sample_booking();
        b.confirm();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert!(b.is_holding());
        assert!(b.is_confirmed());
    }

    #[test]
    fn cancel_releases_calendar() {
        let mut b = sample_booking();
        b.cancel();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.is_holding());
    }

    #[test]
    fn payment_reference_has_prefix_and_is_unique() {
        let a = generate_payment_reference();
        let b = generate_payment_reference();
        assert!(a.starts_with(PAYMENT_REFERENCE_PREFIX));
        assert_eq!(a.len(), PAYMENT_REFERENCE_PREFIX.len() + 24);
        assert_ne!(a, b);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            let parsed = BookingStatus::from_str(status.as_str());
            assert_eq!(&parsed, status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(
            BookingStatus::from_str("Unknown"),
            BookingStatus::Cancelled
        );
    }
}
