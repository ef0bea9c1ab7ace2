//! SeaORM entities

pub mod booking;
pub mod discount_code;
