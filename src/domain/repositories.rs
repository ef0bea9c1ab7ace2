//! Repository aggregation for the domain layer

use super::booking::BookingRepository;
use super::discount::DiscountCodeRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let booking = repos.bookings().find_by_reference("PAY-...").await?;
///     let code = repos.discount_codes().find_by_code("save10").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn discount_codes(&self) -> &dyn DiscountCodeRepository;
}
