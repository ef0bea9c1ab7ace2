//! Application layer: use cases and outbound ports

pub mod ports;
pub mod services;

pub use ports::{BookingNotifier, PaymentGateway, ProviderVerification};
pub use services::{
    AdmissionRequest, BookingService, PaymentReconciler, PricingService, Quote, ReconcilerConfig,
    WebhookOutcome,
};
