//! Booking aggregate: entity, stay interval and repository contract

pub mod model;
pub mod repository;

pub use model::{generate_payment_reference, Booking, BookingStatus, Guest, StayPeriod};
pub use repository::BookingRepository;
