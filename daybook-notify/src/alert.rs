//! Alert text for a due reminder.

use std::time::Duration;

use daybook_core::ScheduledEvent;

/// How long an alert stays up before the engine dismisses it.
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(10);

/// One notification as handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    /// Event id, so the host can replace a stale alert for the same event
    pub tag: String,
    /// Keep the alert up until the user dismisses it
    pub require_interaction: bool,
    pub auto_dismiss: Duration,
}

impl Alert {
    pub fn for_event(event: &ScheduledEvent, minutes_until: i64, auto_dismiss: Duration) -> Self {
        let title = match &event.reminder_title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => format!("⏰ {}", event.title),
        };

        Alert {
            title,
            body: format!("{}\n{}", lead_text(minutes_until), event.time_range()),
            tag: event.id.clone(),
            require_interaction: true,
            auto_dismiss,
        }
    }
}

/// "Starting now!" once the start is reached, otherwise the remaining minutes.
pub fn lead_text(minutes_until: i64) -> String {
    match minutes_until {
        m if m <= 0 => "Starting now!".to_string(),
        1 => "Starting in 1 minute".to_string(),
        m => format!("Starting in {m} minutes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::event_at;

    #[test]
    fn test_lead_text_wording() {
        assert_eq!(lead_text(-1), "Starting now!");
        assert_eq!(lead_text(0), "Starting now!");
        assert_eq!(lead_text(1), "Starting in 1 minute");
        assert_eq!(lead_text(2), "Starting in 2 minutes");
        assert_eq!(lead_text(14), "Starting in 14 minutes");
    }

    #[test]
    fn test_default_title_uses_event_title() {
        let event = event_at("e1", "10:00", Some(15));
        let alert = Alert::for_event(&event, 14, DEFAULT_AUTO_DISMISS);

        assert_eq!(alert.title, "⏰ Team Meeting");
        assert_eq!(alert.body, "Starting in 14 minutes\n10:00 - 11:00");
        assert_eq!(alert.tag, "e1");
        assert!(alert.require_interaction);
        assert_eq!(alert.auto_dismiss, Duration::from_secs(10));
    }

    #[test]
    fn test_reminder_title_overrides_default() {
        let mut event = event_at("e1", "10:00", Some(15));
        event.reminder_title = Some("Leave for the office".to_string());

        let alert = Alert::for_event(&event, 0, DEFAULT_AUTO_DISMISS);

        assert_eq!(alert.title, "Leave for the office");
        assert!(alert.body.starts_with("Starting now!\n"));
    }

    #[test]
    fn test_empty_reminder_title_falls_back() {
        let mut event = event_at("e1", "10:00", Some(15));
        event.reminder_title = Some(String::new());

        let alert = Alert::for_event(&event, 5, DEFAULT_AUTO_DISMISS);

        assert_eq!(alert.title, "⏰ Team Meeting");
    }
}
