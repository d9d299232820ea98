//! Scheduled events as the organizer stores them.
//!
//! The serialized shape matches the organizer's event list: camelCase keys,
//! `date` as `YYYY-MM-DD` and times as `HH:MM` local wall-clock values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::time_of_day::TimeOfDay;

/// A calendar event with an optional reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    // Reminder
    /// Minutes before the start to remind; absent or zero means no reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<u32>,
    /// Replaces the default alert title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_title: Option<String>,
}

impl ScheduledEvent {
    /// Lead time in minutes, if a reminder was requested.
    pub fn reminder_lead(&self) -> Option<u32> {
        self.reminder_minutes.filter(|m| *m > 0)
    }

    /// Local wall-clock start of the event.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_time.on(self.date)
    }

    /// Time range as displayed to the user, e.g. `10:00 - 11:00`.
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}
