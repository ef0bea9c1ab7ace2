//! Outbound ports — interfaces to external collaborators
//!
//! These traits are the architectural contract that decouples the booking
//! and reconciliation services from concrete transports. Production
//! implementations live in `infrastructure/payment` (HTTP gateway) and
//! `notifications` (invoice dispatch over the event bus).

use async_trait::async_trait;

use crate::domain::Booking;
use crate::shared::errors::DomainResult;

// ── Payment provider ───────────────────────────────────────────

/// The provider's answer to a transaction-verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderVerification {
    /// The merchant payment reference the provider's record carries
    pub reference: String,
    /// Whether the charge reached a terminal success state
    pub succeeded: bool,
    /// Captured amount in minor currency units, when the provider reports it
    pub amount: Option<i64>,
}

/// Port for querying the payment provider's source of truth.
///
/// Implementations must return [`DomainError::ProviderUnavailable`] for
/// transport-level failures so callers can surface a retryable error; they
/// must never fabricate a success result.
///
/// [`DomainError::ProviderUnavailable`]: crate::shared::errors::DomainError
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Verify a transaction by the provider-issued reference (the "proof"
    /// the paying client hands back after checkout).
    async fn verify_transaction(
        &self,
        provider_reference: &str,
    ) -> DomainResult<ProviderVerification>;
}

// ── Notification dispatch ──────────────────────────────────────

/// Port for triggering the booking-confirmation notification (invoice
/// email and dashboard fan-out).
///
/// Strictly best-effort: the ledger logs and swallows errors from this
/// port. A confirmed, paid booking must never appear to fail because of a
/// notification problem.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn send_confirmation(&self, booking: &Booking) -> DomainResult<()>;
}
