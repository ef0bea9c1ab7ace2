//! Real-time notifications for operational dashboards
//!
//! - `events`: typed event definitions
//! - `event_bus`: tokio broadcast pub/sub
//! - `invoice`: confirmation-invoice dispatch (production `BookingNotifier`)

pub mod event_bus;
pub mod events;
pub mod invoice;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{Event, EventMessage};
pub use invoice::InvoiceNotifier;
