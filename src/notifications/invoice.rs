//! Invoice notification dispatch
//!
//! Production [`BookingNotifier`]: hands the confirmed booking to the
//! invoice mail pipeline (owned by the campaigns system, outside this
//! service) and fans the confirmation out to dashboard subscribers.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::application::ports::BookingNotifier;
use crate::domain::Booking;
use crate::shared::errors::DomainResult;

use super::event_bus::SharedEventBus;
use super::events::{BookingConfirmedEvent, Event};

pub struct InvoiceNotifier {
    event_bus: SharedEventBus,
}

impl InvoiceNotifier {
    pub fn new(event_bus: SharedEventBus) -> Self {
        Self { event_bus }
    }
}

#[async_trait]
impl BookingNotifier for InvoiceNotifier {
    async fn send_confirmation(&self, booking: &Booking) -> DomainResult<()> {
        info!(
            booking_id = %booking.id,
            unit_id = %booking.unit_id,
            guest_email = %booking.guest.email,
            total_amount = booking.total_amount,
            currency = %booking.currency,
            "Dispatching booking confirmation invoice"
        );

        self.event_bus.publish(Event::BookingConfirmed(BookingConfirmedEvent {
            booking_id: booking.id.clone(),
            unit_id: booking.unit_id.clone(),
            payment_reference: booking.payment_reference.clone(),
            total_amount: booking.total_amount,
            timestamp: Utc::now(),
        }));

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Booking, Guest, StayPeriod};
    use crate::notifications::event_bus::create_event_bus;
    use chrono::NaiveDate;

    fn sample_booking() -> Booking {
        Booking::new(
            "U1",
            Guest {
                user_id: None,
                full_name: "Grace Hopper".into(),
                email: "grace@example.com".into(),
                phone: None,
            },
            StayPeriod::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            )
            .unwrap(),
            50_000,
            "NGN",
            None,
        )
    }

    #[tokio::test]
    async fn confirmation_is_published_to_the_bus() {
        let bus = create_event_bus();
        let mut subscriber = bus.subscribe();
        let notifier = InvoiceNotifier::new(bus);

        let booking = sample_booking();
        notifier.send_confirmation(&booking).await.unwrap();

        let received =
            tokio::time::timeout(std::time::Duration::from_millis(100), subscriber.recv())
                .await
                .expect("Timeout")
                .expect("No message");

        assert_eq!(received.event.event_type(), "booking_confirmed");
        assert_eq!(received.event.unit_id(), Some("U1"));
    }
}
