//! Where each scan gets its events from.
//!
//! The organizer owns the event list; the engine only sees the snapshot taken
//! for the current scan and never holds on to it.

use std::sync::{Arc, Mutex};

use daybook_core::store::EventStore;
use daybook_core::{DaybookResult, ScheduledEvent};

pub trait EventSource: Send + 'static {
    fn snapshot(&self) -> DaybookResult<Vec<ScheduledEvent>>;
}

impl EventSource for EventStore {
    fn snapshot(&self) -> DaybookResult<Vec<ScheduledEvent>> {
        self.load()
    }
}

impl EventSource for Vec<ScheduledEvent> {
    fn snapshot(&self) -> DaybookResult<Vec<ScheduledEvent>> {
        Ok(self.clone())
    }
}

/// An in-memory list another task keeps editing.
impl EventSource for Arc<Mutex<Vec<ScheduledEvent>>> {
    fn snapshot(&self) -> DaybookResult<Vec<ScheduledEvent>> {
        Ok(self.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
