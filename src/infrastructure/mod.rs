//! Infrastructure: persistence, provider clients and crypto

pub mod crypto;
pub mod database;
pub mod payment;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use payment::{HttpPaymentGateway, PaymentGatewayConfig};
pub use storage::InMemoryRepositoryProvider;
