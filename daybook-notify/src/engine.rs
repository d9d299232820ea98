//! Reminder engine.
//!
//! Each scan looks at today's events and fires a reminder for every event
//! whose window `[start - lead, start + 1 minute]` contains the current time.
//! An event id fires at most once until the next daily reset, whether or not
//! the host actually showed the alert. Missed windows are never backfilled.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use daybook_core::ScheduledEvent;
use log::{debug, info, trace, warn};

use crate::alert::{Alert, DEFAULT_AUTO_DISMISS};
use crate::clock::Clock;
use crate::error::NotifyError;
use crate::notifier::{HostPermission, Notifier};

/// How far past the start a reminder may still fire, in minutes.
const LATE_TOLERANCE_MINUTES: i64 = 1;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The host cannot show notifications at all
    Unsupported,
    Granted,
    Denied,
}

/// Cached authorization, as seen by `scan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Per-process reminder bookkeeping. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct NotificationState {
    notified_ids: HashSet<String>,
    permission: PermissionState,
}

impl NotificationState {
    pub fn is_notified(&self, id: &str) -> bool {
        self.notified_ids.contains(id)
    }

    pub fn notified_count(&self) -> usize {
        self.notified_ids.len()
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }
}

/// Why an event did or did not fire on a given scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    NoReminder,
    NotToday,
    /// Window not open yet; a later scan may fire it
    TooEarly { minutes_until: i64 },
    /// Window closed; the event will not fire today
    Missed { minutes_until: i64 },
    Due { minutes_until: i64 },
}

/// Firing decision for one event at `now`, ignoring the notified set.
///
/// Minutes until the start are whole minutes truncated toward zero.
pub fn evaluate(event: &ScheduledEvent, now: NaiveDateTime) -> Decision {
    let Some(lead) = event.reminder_lead() else {
        return Decision::NoReminder;
    };

    if event.date != now.date() {
        return Decision::NotToday;
    }

    let minutes_until = (event.starts_at() - now).num_minutes();

    if minutes_until > i64::from(lead) {
        Decision::TooEarly { minutes_until }
    } else if minutes_until < -LATE_TOLERANCE_MINUTES {
        Decision::Missed { minutes_until }
    } else {
        Decision::Due { minutes_until }
    }
}

/// Resolve the host's capability, prompting only if the user was never asked.
pub async fn negotiate<N: Notifier + ?Sized>(notifier: &N) -> Capability {
    if !notifier.is_supported() {
        return Capability::Unsupported;
    }

    let permission = match notifier.permission() {
        HostPermission::Default => notifier.request_permission().await,
        decided => decided,
    };

    match permission {
        HostPermission::Granted => Capability::Granted,
        // A dismissed prompt counts as a refusal for this session.
        HostPermission::Denied | HostPermission::Default => Capability::Denied,
    }
}

/// An alert that was shown and must be closed after `after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dismissal {
    pub tag: String,
    pub after: Duration,
}

pub struct ReminderEngine<C, N> {
    clock: C,
    notifier: Arc<N>,
    state: NotificationState,
    dismissals: Vec<Dismissal>,
    unsupported: bool,
    auto_dismiss: Duration,
}

impl<C: Clock, N: Notifier> ReminderEngine<C, N> {
    pub fn new(clock: C, notifier: N) -> Self {
        ReminderEngine {
            clock,
            notifier: Arc::new(notifier),
            state: NotificationState::default(),
            dismissals: Vec::new(),
            unsupported: false,
            auto_dismiss: DEFAULT_AUTO_DISMISS,
        }
    }

    pub fn with_auto_dismiss(mut self, auto_dismiss: Duration) -> Self {
        self.auto_dismiss = auto_dismiss;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn notifier(&self) -> Arc<N> {
        Arc::clone(&self.notifier)
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// A capability settled earlier in this session, if any.
    pub fn cached_capability(&self) -> Option<Capability> {
        if self.unsupported {
            return Some(Capability::Unsupported);
        }
        match self.state.permission {
            PermissionState::Granted => Some(Capability::Granted),
            PermissionState::Denied => Some(Capability::Denied),
            PermissionState::Unknown => None,
        }
    }

    /// Query the host and prompt the user once per session.
    pub async fn request_permission(&mut self) -> Capability {
        if let Some(capability) = self.cached_capability() {
            return capability;
        }

        let capability = negotiate(&*self.notifier).await;
        self.record_capability(capability);
        capability
    }

    /// Cache the result of a permission request made outside the engine.
    pub fn record_capability(&mut self, capability: Capability) {
        match capability {
            // Permission stays unknown; dispatch is skipped on the support check.
            Capability::Unsupported => {
                info!("Notifications are not supported here; tracking reminders only");
                self.unsupported = true;
            }
            Capability::Granted => self.state.permission = PermissionState::Granted,
            Capability::Denied => {
                info!("Notification permission denied; tracking reminders only");
                self.state.permission = PermissionState::Denied;
            }
        }
    }

    /// Scan at the clock's current time.
    pub fn tick(&mut self, events: &[ScheduledEvent]) -> usize {
        let now = self.clock.now();
        self.scan(now, events)
    }

    /// Fire every due, not yet notified event. Returns how many fired.
    pub fn scan(&mut self, now: NaiveDateTime, events: &[ScheduledEvent]) -> usize {
        let mut fired = 0;

        for event in events {
            if self.state.is_notified(&event.id) {
                continue;
            }

            match evaluate(event, now) {
                Decision::Due { minutes_until } => {
                    self.fire(event, minutes_until);
                    fired += 1;
                }
                decision => trace!("Skipping event {}: {:?}", event.id, decision),
            }
        }

        fired
    }

    /// Alerts shown since the last call, for the caller to close on time.
    pub fn take_dismissals(&mut self) -> Vec<Dismissal> {
        std::mem::take(&mut self.dismissals)
    }

    /// Forget every notified id. Run at local midnight.
    pub fn reset_daily(&mut self) {
        debug!(
            "Daily reset, forgetting {} notified event(s)",
            self.state.notified_ids.len()
        );
        self.state.notified_ids.clear();
    }

    fn fire(&mut self, event: &ScheduledEvent, minutes_until: i64) {
        let alert = Alert::for_event(event, minutes_until, self.auto_dismiss);

        match self.dispatch(&alert) {
            Ok(()) => {
                info!("Reminder shown for event {} ({})", event.id, alert.title);
                self.dismissals.push(Dismissal {
                    tag: alert.tag.clone(),
                    after: alert.auto_dismiss,
                });
            }
            Err(e @ NotifyError::Dispatch(_)) => {
                warn!("Reminder for event {} not shown: {}", event.id, e)
            }
            Err(e) => debug!("Reminder for event {} not shown: {}", event.id, e),
        }

        // Marked even on failure: a later retry could duplicate the alert.
        self.state.notified_ids.insert(event.id.clone());
    }

    fn dispatch(&self, alert: &Alert) -> Result<(), NotifyError> {
        if self.unsupported {
            return Err(NotifyError::UnsupportedCapability);
        }
        match self.state.permission {
            PermissionState::Granted => self.notifier.show(alert),
            PermissionState::Denied => Err(NotifyError::PermissionDenied),
            PermissionState::Unknown => Err(NotifyError::PermissionPending),
        }
    }
}
