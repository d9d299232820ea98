//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use daybook_core::ScheduledEvent;
use daybook_core::time_of_day::TimeOfDay;
use tokio::sync::Notify;

use crate::alert::Alert;
use crate::error::NotifyError;
use crate::notifier::{HostPermission, Notifier};

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

/// Local wall-clock time on `today()`.
pub(crate) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    today().and_hms_opt(hour, minute, 0).unwrap()
}

/// A one-hour "Team Meeting" on `today()`.
pub(crate) fn event_at(id: &str, start: &str, reminder_minutes: Option<u32>) -> ScheduledEvent {
    let start_time: TimeOfDay = start.parse().unwrap();
    let end_time =
        TimeOfDay::from_hm((start_time.hour() + 1) % 24, start_time.minute()).unwrap();

    ScheduledEvent {
        id: id.to_string(),
        title: "Team Meeting".to_string(),
        date: today(),
        start_time,
        end_time,
        description: None,
        color: None,
        reminder_minutes,
        reminder_title: None,
    }
}

/// Records every alert and permission prompt.
pub(crate) struct RecordingNotifier {
    supported: bool,
    permission: Mutex<HostPermission>,
    prompt_answer: HostPermission,
    /// Holds the prompt open until notified
    prompt_gate: Option<Arc<Notify>>,
    fail_dispatch: bool,
    prompts: AtomicUsize,
    shown: Mutex<Vec<Alert>>,
    dismissed: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn build(supported: bool, permission: HostPermission, prompt_answer: HostPermission) -> Self {
        RecordingNotifier {
            supported,
            permission: Mutex::new(permission),
            prompt_answer,
            prompt_gate: None,
            fail_dispatch: false,
            prompts: AtomicUsize::new(0),
            shown: Mutex::new(Vec::new()),
            dismissed: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn granted() -> Self {
        Self::build(true, HostPermission::Granted, HostPermission::Granted)
    }

    pub(crate) fn denied() -> Self {
        Self::build(true, HostPermission::Denied, HostPermission::Denied)
    }

    pub(crate) fn unsupported() -> Self {
        Self::build(false, HostPermission::Default, HostPermission::Granted)
    }

    /// Permission not decided yet; the prompt answers with `answer`.
    pub(crate) fn prompting(answer: HostPermission) -> Self {
        Self::build(true, HostPermission::Default, answer)
    }

    /// Like `prompting`, but the user only answers once `gate` is notified.
    pub(crate) fn prompting_until(answer: HostPermission, gate: Arc<Notify>) -> Self {
        RecordingNotifier {
            prompt_gate: Some(gate),
            ..Self::prompting(answer)
        }
    }

    pub(crate) fn failing() -> Self {
        RecordingNotifier {
            fail_dispatch: true,
            ..Self::granted()
        }
    }

    pub(crate) fn shown(&self) -> Vec<Alert> {
        self.shown.lock().unwrap().clone()
    }

    pub(crate) fn shown_tags(&self) -> Vec<String> {
        self.shown().into_iter().map(|a| a.tag).collect()
    }

    pub(crate) fn dismissed(&self) -> Vec<String> {
        self.dismissed.lock().unwrap().clone()
    }

    pub(crate) fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> HostPermission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> HostPermission {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.prompt_gate {
            gate.notified().await;
        }
        *self.permission.lock().unwrap() = self.prompt_answer;
        self.prompt_answer
    }

    fn show(&self, alert: &Alert) -> Result<(), NotifyError> {
        if self.fail_dispatch {
            return Err(NotifyError::Dispatch("platform refused".to_string()));
        }
        self.shown.lock().unwrap().push(alert.clone());
        Ok(())
    }

    fn dismiss(&self, tag: &str) {
        self.dismissed.lock().unwrap().push(tag.to_string());
    }
}
