//! Discount aggregate: code entity and repository contract

pub mod model;
pub mod repository;

pub use model::{AppliedDiscount, DiscountCode, DiscountKind};
pub use repository::DiscountCodeRepository;
