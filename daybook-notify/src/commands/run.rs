use anyhow::Result;
use daybook_core::config::DaybookConfig;
use daybook_core::store::EventStore;
use daybook_notify::{Notifier, ReminderEngine, ReminderService, ServiceSettings, SystemClock};
use log::info;

pub async fn run(config: &DaybookConfig, notifier: Box<dyn Notifier>) -> Result<()> {
    let store = EventStore::new(config.events_path());
    info!("Watching {}", store.path().display());

    let engine =
        ReminderEngine::new(SystemClock, notifier).with_auto_dismiss(config.display_timeout());
    let service = ReminderService::start(engine, store, ServiceSettings::from_config(config));

    tokio::signal::ctrl_c().await?;

    let engine = service.stop().await?;
    info!(
        "{} reminder(s) fired since the last daily reset",
        engine.state().notified_count()
    );

    Ok(())
}
