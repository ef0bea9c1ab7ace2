//! SeaORM repository implementations

pub mod booking_repository;
pub mod discount_code_repository;
pub mod repository_provider;

pub use booking_repository::SeaOrmBookingRepository;
pub use discount_code_repository::SeaOrmDiscountCodeRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
