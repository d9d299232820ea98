//! Timer loop around the reminder engine.
//!
//! One task owns the engine and waits on three things: the pending permission
//! request, the scan interval and the next local midnight. Nothing else
//! touches the engine while it runs, so its state needs no locking. The
//! permission request never blocks a scan; until it resolves, scans see the
//! permission as unknown.

use std::time::Duration;

use chrono::NaiveDateTime;
use daybook_core::config::DaybookConfig;
use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::clock::Clock;
use crate::engine::{ReminderEngine, negotiate};
use crate::notifier::Notifier;
use crate::source::EventSource;

const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);
const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub scan_interval: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        ServiceSettings {
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &DaybookConfig) -> Self {
        ServiceSettings {
            scan_interval: config.scan_interval(),
        }
    }
}

/// A running reminder loop. Stopping it, or dropping it, cancels the scan
/// timer and the midnight timer together.
pub struct ReminderService<C, N> {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<ReminderEngine<C, N>>,
}

impl<C: Clock, N: Notifier + 'static> ReminderService<C, N> {
    /// Spawn the loop. The first scan runs immediately.
    pub fn start<S: EventSource>(
        engine: ReminderEngine<C, N>,
        source: S,
        settings: ServiceSettings,
    ) -> Self {
        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(engine, source, settings, shutdown_rx));
        ReminderService { shutdown, task }
    }

    /// Stop both timers and hand the engine back.
    pub async fn stop(self) -> Result<ReminderEngine<C, N>, JoinError> {
        // Err only if the loop already ended
        let _ = self.shutdown.send(());
        self.task.await
    }
}

/// Time from `now` until the next local midnight.
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    now.date()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .and_then(|midnight| (midnight - now).to_std().ok())
        .unwrap_or(ONE_DAY)
}

/// Close each alert shown by the last scan once its display time is up.
fn schedule_dismissals<C: Clock, N: Notifier + 'static>(engine: &mut ReminderEngine<C, N>) {
    for dismissal in engine.take_dismissals() {
        let notifier = engine.notifier();
        tokio::spawn(async move {
            time::sleep(dismissal.after).await;
            notifier.dismiss(&dismissal.tag);
        });
    }
}

async fn run<C, N, S>(
    mut engine: ReminderEngine<C, N>,
    source: S,
    settings: ServiceSettings,
    mut shutdown: oneshot::Receiver<()>,
) -> ReminderEngine<C, N>
where
    C: Clock,
    N: Notifier + 'static,
    S: EventSource,
{
    let notifier = engine.notifier();
    let cached = engine.cached_capability();
    let permission = async move {
        match cached {
            Some(capability) => capability,
            None => negotiate(&*notifier).await,
        }
    };
    tokio::pin!(permission);
    let mut permission_pending = true;

    let mut scan_timer = time::interval(settings.scan_interval.max(Duration::from_millis(1)));
    scan_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The timer runs on real time while midnight is a wall-clock date, so
    // they disagree across DST changes. Reset only once the date has moved.
    let mut reset_day = engine.clock().now().date();
    let midnight = time::sleep(until_next_midnight(engine.clock().now()));
    tokio::pin!(midnight);

    info!(
        "Reminder service started, scanning every {}s",
        settings.scan_interval.as_secs()
    );

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break,

            capability = &mut permission, if permission_pending => {
                permission_pending = false;
                debug!("Notification capability: {capability:?}");
                engine.record_capability(capability);
            }

            () = &mut midnight => {
                let now = engine.clock().now();
                if now.date() > reset_day {
                    engine.reset_daily();
                    reset_day = now.date();
                } else {
                    debug!("Midnight timer fired at {now}, before the date changed; re-arming");
                }
                midnight.as_mut().reset(Instant::now() + until_next_midnight(now));
            }

            _ = scan_timer.tick() => match source.snapshot() {
                Ok(events) => {
                    engine.tick(&events);
                    schedule_dismissals(&mut engine);
                }
                Err(e) => warn!("Skipping reminder scan, could not read events: {e}"),
            },
        }
    }

    info!("Reminder service stopped");
    engine
}
