//! Core types for the daybook organizer.
//!
//! Shared by the reminder service and anything else that reads the event list:
//! - `event` for scheduled events as the organizer stores them
//! - `store` for the JSON event file
//! - `config` for the global configuration

pub mod config;
pub mod error;
pub mod event;
pub mod store;
pub mod time_of_day;

pub use error::{DaybookError, DaybookResult};
pub use event::ScheduledEvent;
