//! Booking ledger service
//!
//! Owns the authoritative set of bookings and every state transition on
//! them. `admit` runs the availability check and the insert as one atomic
//! unit under a per-unit lock; `confirm` is an idempotent compare-and-set
//! so payment signals can arrive any number of times from either path.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use metrics::counter;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::application::ports::BookingNotifier;
use crate::domain::{
    AppliedDiscount, Booking, BookingStatus, Guest, RepositoryProvider, StayPeriod,
};
use crate::notifications::events::{BookingCancelledEvent, BookingCreatedEvent, Event};
use crate::notifications::SharedEventBus;
use crate::shared::errors::{DomainError, DomainResult};

/// Default bound on waiting for a unit's admission lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// A priced admission request
#[derive(Debug, Clone)]
pub struct AdmissionRequest {
    pub unit_id: String,
    pub guest: Guest,
    pub period: StayPeriod,
    /// Final chargeable amount in minor currency units (discount applied)
    pub total_amount: i64,
    pub currency: String,
    pub discount: Option<AppliedDiscount>,
}

/// Service owning booking admission and state transitions
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    notifier: Arc<dyn BookingNotifier>,
    event_bus: SharedEventBus,
    /// Per-unit admission locks; held across the overlap check and the
    /// insert so two concurrent admissions cannot both observe "free"
    unit_locks: DashMap<String, Arc<Mutex<()>>>,
    lock_timeout: Duration,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<dyn BookingNotifier>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self::with_lock_timeout(repos, notifier, event_bus, DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<dyn BookingNotifier>,
        event_bus: SharedEventBus,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            repos,
            notifier,
            event_bus,
            unit_locks: DashMap::new(),
            lock_timeout,
        }
    }

    /// Admit a stay: check availability and insert the pending booking as a
    /// single atomic unit with respect to other admissions on the unit.
    pub async fn admit(&self, request: AdmissionRequest) -> DomainResult<Booking> {
        let lock = self
            .unit_locks
            .entry(request.unit_id.clone())
            .or_default()
            .clone();

        let _guard = tokio::time::timeout(self.lock_timeout, lock.lock())
            .await
            .map_err(|_| DomainError::LockTimeout(request.unit_id.clone()))?;

        let conflicting = self
            .repos
            .bookings()
            .find_overlapping(&request.unit_id, &request.period)
            .await?;

        if let Some(existing) = conflicting.first() {
            counter!("bookings_conflicted_total").increment(1);
            info!(
                unit_id = %request.unit_id,
                requested = %request.period,
                conflicting_booking = %existing.id,
                "Admission rejected: dates unavailable"
            );
            return Err(DomainError::UnitUnavailable {
                unit_id: request.unit_id,
                check_in: request.period.check_in(),
                check_out: request.period.check_out(),
            });
        }

        let booking = Booking::new(
            request.unit_id,
            request.guest,
            request.period,
            request.total_amount,
            request.currency,
            request.discount,
        );
        self.repos.bookings().insert(booking.clone()).await?;

        counter!("bookings_admitted_total").increment(1);
        info!(
            booking_id = %booking.id,
            unit_id = %booking.unit_id,
            period = %booking.period,
            total_amount = booking.total_amount,
            payment_reference = %booking.payment_reference,
            "Booking admitted"
        );

        self.event_bus.publish(Event::BookingCreated(BookingCreatedEvent {
            booking_id: booking.id.clone(),
            unit_id: booking.unit_id.clone(),
            check_in: booking.period.check_in(),
            check_out: booking.period.check_out(),
            total_amount: booking.total_amount,
            timestamp: chrono::Utc::now(),
        }));

        Ok(booking)
    }

    /// Confirm the booking holding `reference`.
    ///
    /// Idempotent: repeat calls (sequential or concurrent) collapse to one
    /// state transition and exactly one confirmation notification. Only the
    /// call whose compare-and-set wins dispatches the notification.
    pub async fn confirm(&self, reference: &str) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "payment_reference",
                value: reference.to_string(),
            })?;

        match booking.status {
            BookingStatus::Confirmed => Ok(booking),
            BookingStatus::Cancelled => Err(DomainError::StateFinal {
                id: booking.id,
                status: BookingStatus::Cancelled.to_string(),
            }),
            BookingStatus::Pending => {
                let swapped = self
                    .repos
                    .bookings()
                    .compare_and_set_status(
                        reference,
                        BookingStatus::Pending,
                        BookingStatus::Confirmed,
                    )
                    .await?;

                if swapped {
                    let mut confirmed = booking;
                    confirmed.confirm();

                    counter!("bookings_confirmed_total").increment(1);
                    info!(
                        booking_id = %confirmed.id,
                        payment_reference = %reference,
                        "Booking confirmed"
                    );

                    // Best-effort: a confirmed, paid booking never fails
                    // because the invoice could not be sent.
                    if let Err(e) = self.notifier.send_confirmation(&confirmed).await {
                        error!(
                            booking_id = %confirmed.id,
                            error = %e,
                            "Failed to dispatch confirmation notification"
                        );
                    }

                    Ok(confirmed)
                } else {
                    // Lost the race: another signal moved the booking first.
                    self.resolve_settled(reference).await
                }
            }
        }
    }

    /// Cancel a pending booking by ID. Cancelling an already-cancelled
    /// booking is a no-op; a confirmed booking cannot be cancelled here.
    pub async fn cancel(&self, id: &str) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })?;

        match booking.status {
            BookingStatus::Cancelled => Ok(booking),
            BookingStatus::Confirmed => Err(DomainError::StateFinal {
                id: booking.id,
                status: BookingStatus::Confirmed.to_string(),
            }),
            BookingStatus::Pending => {
                let swapped = self
                    .repos
                    .bookings()
                    .compare_and_set_status(
                        &booking.payment_reference,
                        BookingStatus::Pending,
                        BookingStatus::Cancelled,
                    )
                    .await?;

                if !swapped {
                    // A payment signal confirmed the booking underneath us.
                    warn!(booking_id = %id, "Cancel lost the race to a confirmation");
                    return Err(DomainError::StateFinal {
                        id: booking.id,
                        status: BookingStatus::Confirmed.to_string(),
                    });
                }

                let mut cancelled = booking;
                cancelled.cancel();

                info!(booking_id = %id, unit_id = %cancelled.unit_id, "Booking cancelled");
                self.event_bus.publish(Event::BookingCancelled(BookingCancelledEvent {
                    booking_id: cancelled.id.clone(),
                    unit_id: cancelled.unit_id.clone(),
                    timestamp: chrono::Utc::now(),
                }));

                Ok(cancelled)
            }
        }
    }

    pub async fn get(&self, id: &str) -> DomainResult<Option<Booking>> {
        self.repos.bookings().find_by_id(id).await
    }

    pub async fn get_by_reference(&self, reference: &str) -> DomainResult<Option<Booking>> {
        self.repos.bookings().find_by_reference(reference).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    /// Holding (pending or confirmed) bookings for a unit, for dashboards
    pub async fn holding_for_unit(&self, unit_id: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_holding_for_unit(unit_id).await
    }

    /// Re-read a booking after a lost CAS and report its settled state.
    async fn resolve_settled(&self, reference: &str) -> DomainResult<Booking> {
        let settled = self
            .repos
            .bookings()
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "payment_reference",
                value: reference.to_string(),
            })?;

        match settled.status {
            BookingStatus::Confirmed => Ok(settled),
            BookingStatus::Cancelled => Err(DomainError::StateFinal {
                id: settled.id,
                status: BookingStatus::Cancelled.to_string(),
            }),
            BookingStatus::Pending => Err(DomainError::Storage(format!(
                "booking {} reverted to Pending after a failed status swap",
                settled.id
            ))),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
