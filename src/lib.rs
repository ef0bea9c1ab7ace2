//! # Stayvia Booking
//!
//! Booking backend for time-bounded apartment inventory: interval-safe
//! reservation admission plus dual-path idempotent payment reconciliation.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic (pricing, the booking ledger, payment
//!   reconciliation) and outbound ports
//! - **infrastructure**: External concerns (database, in-memory storage,
//!   payment provider client, webhook crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **notifications**: Real-time events for dashboards and the invoice
//!   dispatch path
//! - **shared**: Error taxonomy and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
