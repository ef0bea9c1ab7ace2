//! Payment DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Client callback after completing payment at the provider
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyPaymentRequest {
    /// The booking's payment reference handed out at admission
    #[validate(length(min = 1, max = 64))]
    pub reference: String,
    /// Provider-issued transaction reference (the proof of payment)
    #[validate(length(min = 1, max = 128))]
    pub provider_reference: String,
}

/// Acknowledgment for a webhook delivery
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    /// What the delivery amounted to (confirmed, already_confirmed,
    /// unmatched, ignored)
    pub outcome: String,
}
