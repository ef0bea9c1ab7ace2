//! Pricing service: stay quotes and discount application

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{AppliedDiscount, DiscountCode, RepositoryProvider, StayPeriod};
use crate::shared::errors::{DomainError, DomainResult};

/// A priced stay, before admission
#[derive(Debug, Clone)]
pub struct Quote {
    pub nights: i64,
    /// Rate per night in minor currency units
    pub nightly_rate: i64,
    /// nights × nightly_rate, before discount
    pub base_amount: i64,
    /// Final chargeable amount, never negative
    pub total_amount: i64,
    pub discount: Option<AppliedDiscount>,
}

/// Service for pricing operations.
///
/// Pure computation over its inputs; the only collaborator is the discount
/// code store.
pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Price a stay: `nights × nightly_rate`, minus an optional discount.
    ///
    /// An unknown or expired code fails the quote; the caller may retry
    /// without the code to book at full price.
    pub async fn quote(
        &self,
        nightly_rate: i64,
        period: &StayPeriod,
        discount_code: Option<&str>,
    ) -> DomainResult<Quote> {
        if nightly_rate <= 0 {
            return Err(DomainError::Validation(
                "nightly_rate must be positive".to_string(),
            ));
        }

        let nights = period.nights();
        let base_amount = nights * nightly_rate;

        let discount = match discount_code {
            Some(raw) => Some(self.resolve_discount(raw, base_amount).await?),
            None => None,
        };

        let total_amount = base_amount - discount.as_ref().map_or(0, |d| d.amount_off);

        info!(
            nights,
            base_amount,
            total_amount,
            discount_code = discount.as_ref().map(|d| d.code.as_str()),
            "Stay priced"
        );

        Ok(Quote {
            nights,
            nightly_rate,
            base_amount,
            total_amount,
            discount,
        })
    }

    async fn resolve_discount(
        &self,
        raw_code: &str,
        base_amount: i64,
    ) -> DomainResult<AppliedDiscount> {
        let normalized = DiscountCode::normalize(raw_code);

        let code = self
            .repos
            .discount_codes()
            .find_by_code(&normalized)
            .await?
            .ok_or_else(|| DomainError::UnknownDiscountCode(normalized.clone()))?;

        if code.is_expired(Utc::now()) {
            return Err(DomainError::ExpiredDiscountCode(normalized));
        }

        let amount_off = base_amount - code.apply(base_amount);

        Ok(AppliedDiscount {
            code: code.code,
            kind: code.kind,
            value: code.value,
            amount_off,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    use crate::domain::DiscountKind;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn period(from: (i32, u32, u32), to: (i32, u32, u32)) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
        .unwrap()
    }

    async fn service_with_code(code: DiscountCode) -> PricingService {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.discount_codes().save(code).await.unwrap();
        PricingService::new(repos)
    }

    fn save10(expires_in: Duration) -> DiscountCode {
        DiscountCode {
            code: "save10".into(),
            kind: DiscountKind::Percentage,
            value: 10,
            expires_at: Utc::now() + expires_in,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn quote_without_discount() {
        let service = PricingService::new(Arc::new(InMemoryRepositoryProvider::new()));
        let q = service
            .quote(25_000, &period((2024, 3, 1), (2024, 3, 5)), None)
            .await
            .unwrap();

        assert_eq!(q.nights, 4);
        assert_eq!(q.base_amount, 100_000);
        assert_eq!(q.total_amount, 100_000);
        assert!(q.discount.is_none());
    }

    #[tokio::test]
    async fn percentage_discount_reduces_total() {
        let service = service_with_code(save10(Duration::days(30))).await;
        let q = service
            .quote(25_000, &period((2024, 3, 1), (2024, 3, 5)), Some("SAVE10"))
            .await
            .unwrap();

        assert_eq!(q.base_amount, 100_000);
        assert_eq!(q.total_amount, 90_000);
        let d = q.discount.unwrap();
        assert_eq!(d.code, "save10");
        assert_eq!(d.amount_off, 10_000);
    }

    #[tokio::test]
    async fn flat_discount_floors_total_at_zero() {
        let service = service_with_code(DiscountCode {
            code: "bigoff".into(),
            kind: DiscountKind::FlatAmount,
            value: 500_000,
            expires_at: Utc::now() + Duration::days(1),
            created_at: Utc::now(),
        })
        .await;

        let q = service
            .quote(25_000, &period((2024, 3, 1), (2024, 3, 5)), Some("bigoff"))
            .await
            .unwrap();

        assert_eq!(q.total_amount, 0);
        assert_eq!(q.discount.unwrap().amount_off, 100_000);
    }

    #[tokio::test]
    async fn unknown_code_is_rejected() {
        let service = PricingService::new(Arc::new(InMemoryRepositoryProvider::new()));
        let err = service
            .quote(25_000, &period((2024, 3, 1), (2024, 3, 5)), Some("nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::UnknownDiscountCode(_)));
    }

    #[tokio::test]
    async fn expired_code_is_rejected() {
        let service = service_with_code(save10(Duration::days(-1))).await;
        let err = service
            .quote(25_000, &period((2024, 6, 1), (2024, 6, 5)), Some("save10"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ExpiredDiscountCode(_)));
    }

    #[tokio::test]
    async fn code_lookup_is_case_insensitive() {
        let service = service_with_code(save10(Duration::days(30))).await;
        let q = service
            .quote(10_000, &period((2024, 3, 1), (2024, 3, 2)), Some("  Save10 "))
            .await
            .unwrap();

        assert_eq!(q.total_amount, 9_000);
    }

    #[tokio::test]
    async fn non_positive_rate_is_rejected() {
        let service = PricingService::new(Arc::new(InMemoryRepositoryProvider::new()));
        let err = service
            .quote(0, &period((2024, 3, 1), (2024, 3, 5)), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }
}
