//! Payment provider integration

pub mod http_gateway;

pub use http_gateway::{HttpPaymentGateway, PaymentGatewayConfig};
