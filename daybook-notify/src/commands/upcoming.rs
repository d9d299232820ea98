use anyhow::Result;
use chrono::NaiveDateTime;
use daybook_core::ScheduledEvent;
use daybook_core::config::DaybookConfig;
use daybook_core::store::EventStore;
use daybook_notify::{Clock, Decision, SystemClock, evaluate};
use owo_colors::OwoColorize;

pub fn run(config: &DaybookConfig) -> Result<()> {
    let events = EventStore::new(config.events_path()).load()?;
    let now = SystemClock.now();

    let mut today: Vec<&ScheduledEvent> = events
        .iter()
        .filter(|e| e.date == now.date() && e.reminder_lead().is_some())
        .collect();
    today.sort_by_key(|e| e.start_time);

    if today.is_empty() {
        println!("{}", "No reminders today.".dimmed());
        return Ok(());
    }

    for event in today {
        let Some(status) = status(event, now) else {
            continue;
        };
        let lead = event.reminder_lead().unwrap_or_default();
        let line = format!(
            "{}  {:<30} {:>3} min before  {}",
            event.time_range(),
            event.title,
            lead,
            status
        );

        match evaluate(event, now) {
            Decision::Due { .. } => println!("{}", line.green()),
            Decision::Missed { .. } => println!("{}", line.dimmed()),
            _ => println!("{line}"),
        }
    }

    Ok(())
}

/// Where a reminder stands at `now`, or `None` if it has none today.
fn status(event: &ScheduledEvent, now: NaiveDateTime) -> Option<String> {
    let lead = i64::from(event.reminder_lead()?);

    match evaluate(event, now) {
        Decision::TooEarly { minutes_until } => {
            Some(format!("reminds in {} min", minutes_until - lead))
        }
        Decision::Due { .. } => Some("due now".to_string()),
        Decision::Missed { .. } => Some("passed".to_string()),
        Decision::NoReminder | Decision::NotToday => None,
    }
}
