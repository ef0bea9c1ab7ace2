//! Application services

pub mod booking;
pub mod pricing;
pub mod reconciliation;

pub use booking::{AdmissionRequest, BookingService};
pub use pricing::{PricingService, Quote};
pub use reconciliation::{PaymentReconciler, ReconcilerConfig, WebhookOutcome};
