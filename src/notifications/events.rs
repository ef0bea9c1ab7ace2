//! Notification events
//!
//! Defines the event types broadcast to operational dashboard subscribers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A booking was admitted in pending state
    BookingCreated(BookingCreatedEvent),
    /// A booking's payment was reconciled
    BookingConfirmed(BookingConfirmedEvent),
    /// A pending booking was cancelled
    BookingCancelled(BookingCancelledEvent),
    /// A webhook delivery failed signature verification
    WebhookRejected(WebhookRejectedEvent),
    /// A successful charge could not be matched to a live booking
    PaymentUnmatched(PaymentUnmatchedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingCreated(_) => "booking_created",
            Event::BookingConfirmed(_) => "booking_confirmed",
            Event::BookingCancelled(_) => "booking_cancelled",
            Event::WebhookRejected(_) => "webhook_rejected",
            Event::PaymentUnmatched(_) => "payment_unmatched",
        }
    }

    /// Get the unit ID if applicable
    pub fn unit_id(&self) -> Option<&str> {
        match self {
            Event::BookingCreated(e) => Some(&e.unit_id),
            Event::BookingConfirmed(e) => Some(&e.unit_id),
            Event::BookingCancelled(e) => Some(&e.unit_id),
            Event::WebhookRejected(_) => None,
            Event::PaymentUnmatched(_) => None,
        }
    }
}

/// Booking admitted event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreatedEvent {
    pub booking_id: String,
    pub unit_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Booking confirmed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmedEvent {
    pub booking_id: String,
    pub unit_id: String,
    pub payment_reference: String,
    pub total_amount: i64,
    pub timestamp: DateTime<Utc>,
}

/// Booking cancelled event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelledEvent {
    pub booking_id: String,
    pub unit_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Webhook rejected event (security-relevant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRejectedEvent {
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Unmatched successful charge event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUnmatchedEvent {
    pub payment_reference: String,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper carrying the event plus broadcast metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub event: Event,
    pub broadcast_at: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            broadcast_at: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_names() {
        let e = Event::WebhookRejected(WebhookRejectedEvent {
            reason: "signature mismatch".into(),
            timestamp: Utc::now(),
        });
        assert_eq!(e.event_type(), "webhook_rejected");
        assert!(e.unit_id().is_none());
    }

    #[test]
    fn serializes_with_type_tag() {
        let e = Event::BookingCancelled(BookingCancelledEvent {
            booking_id: "b-1".into(),
            unit_id: "U1".into(),
            timestamp: Utc::now(),
        });
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "BookingCancelled");
        assert_eq!(json["data"]["unit_id"], "U1");
    }
}
