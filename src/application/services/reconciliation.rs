//! Payment reconciliation service
//!
//! Folds external payment observations into booking state. Two independent
//! entry points feed the same idempotent transition:
//!
//! - `verify_payment`: the paying client calls back synchronously after
//!   checkout and we ask the provider's API for the charge outcome.
//! - `process_webhook`: the provider pushes a signed event asynchronously.
//!
//! Signals may arrive zero, one or many times, in any order, concurrently.
//! The ledger's compare-and-set `confirm` collapses all of them into one
//! transition, so no deduplication happens here.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::application::ports::PaymentGateway;
use crate::application::services::booking::BookingService;
use crate::domain::{Booking, BookingStatus};
use crate::infrastructure::crypto::webhook;
use crate::notifications::events::{Event, PaymentUnmatchedEvent, WebhookRejectedEvent};
use crate::notifications::SharedEventBus;
use crate::shared::errors::{DomainError, DomainResult};

/// The only provider event type that drives a state transition
const CHARGE_SUCCESS_EVENT: &str = "charge.success";

/// Reconciler configuration, passed in at construction time.
///
/// The webhook secret is never read from ambient process state.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Shared secret for webhook HMAC verification
    pub webhook_secret: String,
}

/// What an acknowledged webhook delivery amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The event confirmed a pending booking
    Confirmed,
    /// The booking was already confirmed (duplicate delivery)
    AlreadyConfirmed,
    /// No booking holds the event's payment reference
    Unmatched,
    /// Authentic but irrelevant (foreign event type, unparsable payload,
    /// or a booking already settled as cancelled)
    Ignored,
}

/// Provider webhook payload (only the fields reconciliation reads)
#[derive(Debug, Deserialize)]
struct ProviderEvent {
    event: String,
    data: ProviderEventData,
}

#[derive(Debug, Deserialize)]
struct ProviderEventData {
    reference: String,
    #[serde(default)]
    amount: Option<i64>,
}

/// Service reconciling provider payment signals into the booking ledger
pub struct PaymentReconciler {
    bookings: Arc<BookingService>,
    gateway: Arc<dyn PaymentGateway>,
    event_bus: SharedEventBus,
    config: ReconcilerConfig,
}

impl PaymentReconciler {
    pub fn new(
        bookings: Arc<BookingService>,
        gateway: Arc<dyn PaymentGateway>,
        event_bus: SharedEventBus,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            bookings,
            gateway,
            event_bus,
            config,
        }
    }

    /// Synchronous verify path: the client reports `provider_reference` as
    /// proof of payment for the booking holding `reference`.
    ///
    /// The ledger is only touched after the provider's API reports a
    /// successful charge for that exact reference; a provider outage
    /// surfaces as a retryable error with no state change.
    pub async fn verify_payment(
        &self,
        reference: &str,
        provider_reference: &str,
    ) -> DomainResult<Booking> {
        let verification = self.gateway.verify_transaction(provider_reference).await?;

        if !verification.succeeded || verification.reference != reference {
            info!(
                payment_reference = %reference,
                provider_reference = %provider_reference,
                succeeded = verification.succeeded,
                echoed_reference = %verification.reference,
                "Provider did not confirm the charge"
            );
            return Err(DomainError::PaymentUnconfirmed(reference.to_string()));
        }

        self.bookings.confirm(reference).await
    }

    /// Asynchronous webhook path.
    ///
    /// The signature gate runs before anything else; a mismatch yields
    /// [`DomainError::InvalidSignature`] and zero ledger interaction. Every
    /// authentic delivery (including duplicates and events for unknown or
    /// settled references) resolves to an `Ok` outcome so the provider
    /// receives its 2xx acknowledgment and stops retrying.
    pub async fn process_webhook(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> DomainResult<WebhookOutcome> {
        if !webhook::verify(&self.config.webhook_secret, raw_body, signature_header) {
            counter!("webhooks_rejected_total").increment(1);
            warn!("Webhook rejected: signature does not match body");
            self.event_bus.publish(Event::WebhookRejected(WebhookRejectedEvent {
                reason: "signature mismatch".into(),
                timestamp: Utc::now(),
            }));
            return Err(DomainError::InvalidSignature);
        }

        let event: ProviderEvent = match serde_json::from_slice(raw_body) {
            Ok(event) => event,
            Err(e) => {
                // Authentic but unparsable: provider schema drift must not
                // trigger a retry storm.
                warn!(error = %e, "Ignoring authentic webhook with unparsable payload");
                return Ok(WebhookOutcome::Ignored);
            }
        };

        if event.event != CHARGE_SUCCESS_EVENT {
            debug!(event_type = %event.event, "Ignoring non-charge-success webhook event");
            return Ok(WebhookOutcome::Ignored);
        }

        let reference = event.data.reference.as_str();
        let Some(booking) = self.bookings.get_by_reference(reference).await? else {
            // Possibly a payment for a booking abandoned before admission
            // reached us; acknowledged so the provider stops retrying.
            info!(
                payment_reference = %reference,
                amount = ?event.data.amount,
                "Charge-success webhook matches no booking"
            );
            self.event_bus.publish(Event::PaymentUnmatched(PaymentUnmatchedEvent {
                payment_reference: reference.to_string(),
                timestamp: Utc::now(),
            }));
            return Ok(WebhookOutcome::Unmatched);
        };

        match booking.status {
            BookingStatus::Confirmed => {
                debug!(
                    payment_reference = %reference,
                    booking_id = %booking.id,
                    "Duplicate charge-success webhook for confirmed booking"
                );
                Ok(WebhookOutcome::AlreadyConfirmed)
            }
            BookingStatus::Cancelled => {
                // Money was captured for a stay that no longer holds dates;
                // an operator has to resolve this, the sender does not.
                error!(
                    payment_reference = %reference,
                    booking_id = %booking.id,
                    "Charge succeeded for a cancelled booking"
                );
                self.event_bus.publish(Event::PaymentUnmatched(PaymentUnmatchedEvent {
                    payment_reference: reference.to_string(),
                    timestamp: Utc::now(),
                }));
                Ok(WebhookOutcome::Ignored)
            }
            BookingStatus::Pending => match self.bookings.confirm(reference).await {
                Ok(_) => Ok(WebhookOutcome::Confirmed),
                // Raced a cancellation between the read and the confirm
                Err(DomainError::StateFinal { id, status }) => {
                    warn!(
                        booking_id = %id,
                        status = %status,
                        "Webhook confirmation lost the race to a terminal transition"
                    );
                    Ok(WebhookOutcome::Ignored)
                }
                Err(e) => Err(e),
            },
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
