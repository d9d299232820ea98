//! Reminder engine for daybook events.
//!
//! The engine watches the event list and raises one local notification per
//! event when its reminder lead window opens. The pieces:
//! - `engine` holds the per-day notified set and the firing rules
//! - `service` drives the engine from a scan timer and a midnight reset timer
//! - `notifier` is the seam to the host notification capability

pub mod alert;
pub mod clock;
pub mod engine;
pub mod error;
pub mod notifier;
pub mod service;
pub mod source;

#[cfg(test)]
mod testing;

pub use alert::Alert;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Capability, Decision, Dismissal, NotificationState, PermissionState, ReminderEngine, evaluate};
pub use error::NotifyError;
pub use notifier::{HostPermission, Notifier};
pub use service::{ReminderService, ServiceSettings};
pub use source::EventSource;
