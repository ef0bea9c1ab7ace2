//! Discount code domain entity

use chrono::{DateTime, Utc};

/// Discount rule kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// Percentage off the base amount (value is 0..=100)
    Percentage,
    /// Flat amount off, in minor currency units
    FlatAmount,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::FlatAmount => "FlatAmount",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Percentage" => Self::Percentage,
            _ => Self::FlatAmount,
        }
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A redeemable discount code
#[derive(Debug, Clone)]
pub struct DiscountCode {
    /// Normalized code (lowercase, trimmed); lookups compare normalized
    pub code: String,
    pub kind: DiscountKind,
    /// Percentage points for `Percentage`, minor currency units for
    /// `FlatAmount`
    pub value: i64,
    /// The code is usable strictly before this instant
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DiscountCode {
    /// Normalize user input for lookup and storage.
    pub fn normalize(code: &str) -> String {
        code.trim().to_lowercase()
    }

    /// A code is usable only strictly before its expiration instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Apply the discount to `amount` (minor units). The result is never
    /// negative: a discount larger than the amount floors at zero.
    pub fn apply(&self, amount: i64) -> i64 {
        match self.kind {
            DiscountKind::Percentage => (amount - amount * self.value / 100).max(0),
            DiscountKind::FlatAmount => (amount - self.value).max(0),
        }
    }
}

/// Audit record of a discount applied at admission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDiscount {
    pub code: String,
    pub kind: DiscountKind,
    pub value: i64,
    /// Amount taken off the base, in minor currency units
    pub amount_off: i64,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_code(kind: DiscountKind, value: i64) -> DiscountCode {
        DiscountCode {
            code: "save10".into(),
            kind,
            value,
            expires_at: Utc::now() + Duration::days(30),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn percentage_discount_multiplies() {
        let c = sample_code(DiscountKind::Percentage, 10);
        assert_eq!(c.apply(100_000), 90_000);
    }

    #[test]
    fn percentage_rounds_toward_customer() {
        // 10% of 99 minor units is 9.9; integer math takes 9 off
        let c = sample_code(DiscountKind::Percentage, 10);
        assert_eq!(c.apply(99), 90);
    }

    #[test]
    fn full_percentage_zeroes_the_amount() {
        let c = sample_code(DiscountKind::Percentage, 100);
        assert_eq!(c.apply(100_000), 0);
    }

    #[test]
    fn oversized_percentage_floors_at_zero() {
        let c = sample_code(DiscountKind::Percentage, 150);
        assert_eq!(c.apply(100_000), 0);
    }

    #[test]
    fn flat_discount_subtracts() {
        let c = sample_code(DiscountKind::FlatAmount, 5_000);
        assert_eq!(c.apply(50_000), 45_000);
    }

    #[test]
    fn flat_discount_floors_at_zero() {
        let c = sample_code(DiscountKind::FlatAmount, 75_000);
        assert_eq!(c.apply(50_000), 0);
    }

    #[test]
    fn expired_exactly_at_expiration_instant() {
        let c = sample_code(DiscountKind::Percentage, 10);
        assert!(!c.is_expired(c.expires_at - Duration::seconds(1)));
        assert!(c.is_expired(c.expires_at));
        assert!(c.is_expired(c.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(DiscountCode::normalize("  SAVE10 "), "save10");
        assert_eq!(DiscountCode::normalize("Save10"), "save10");
    }

    #[test]
    fn kind_display_roundtrip() {
        for kind in &[DiscountKind::Percentage, DiscountKind::FlatAmount] {
            assert_eq!(&DiscountKind::from_str(kind.as_str()), kind);
        }
    }
}
