pub mod booking;
pub mod discount;
pub mod repositories;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, BookingStatus, Guest, StayPeriod};
pub use discount::{AppliedDiscount, DiscountCode, DiscountCodeRepository, DiscountKind};
pub use repositories::RepositoryProvider;

// Re-export the shared result/error types for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
