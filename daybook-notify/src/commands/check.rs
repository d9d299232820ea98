use anyhow::Result;
use daybook_core::config::DaybookConfig;
use daybook_core::store::EventStore;
use daybook_notify::{Capability, Notifier, ReminderEngine, SystemClock};

pub async fn run(config: &DaybookConfig, notifier: Box<dyn Notifier>) -> Result<()> {
    let events = EventStore::new(config.events_path()).load()?;

    let mut engine =
        ReminderEngine::new(SystemClock, notifier).with_auto_dismiss(config.display_timeout());

    let capability = engine.request_permission().await;
    println!("Notifications: {}", describe(capability));

    let fired = engine.tick(&events);
    println!("{}", summary(events.len(), fired, capability));

    // Keep shown alerts up for their display time, then close them.
    let dismissals = engine.take_dismissals();
    if let Some(longest) = dismissals.iter().map(|d| d.after).max() {
        tokio::time::sleep(longest).await;
        let notifier = engine.notifier();
        for dismissal in &dismissals {
            notifier.dismiss(&dismissal.tag);
        }
    }

    Ok(())
}

fn describe(capability: Capability) -> &'static str {
    match capability {
        Capability::Granted => "enabled",
        Capability::Denied => "denied (reminders are tracked but not shown)",
        Capability::Unsupported => "unavailable (no notification server found)",
    }
}

fn summary(checked: usize, fired: usize, capability: Capability) -> String {
    let outcome = match capability {
        Capability::Granted => "due",
        Capability::Denied | Capability::Unsupported => "tracked, not shown",
    };
    format!("{checked} event(s) checked, {fired} reminder(s) {outcome}")
}
