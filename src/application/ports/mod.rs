pub mod outbound;

pub use outbound::{BookingNotifier, PaymentGateway, ProviderVerification};
