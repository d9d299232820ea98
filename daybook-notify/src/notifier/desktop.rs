//! Desktop notifications through the platform notification service.
//!
//! Desktops have no per-application prompt, so permission is always granted
//! once a notification server is reachable.
//!
//! Each alert lives on its own thread that owns the notification handle until
//! `dismiss` asks it to close, which keeps D-Bus calls off the async runtime
//! apart from the bounded wait in `show`. Servers that ignore timeouts (GNOME
//! Shell) still lose the alert on time. macOS offers no way to close a shown
//! notification, so there only the timeout applies.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use super::{HostPermission, Notifier};
use crate::alert::Alert;
use crate::error::NotifyError;

const APP_NAME: &str = "daybook";

/// How long `show` waits for the notification server to accept an alert.
const SHOW_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub struct DesktopNotifier {
    app_name: String,
    /// Close signal per open alert, keyed by tag
    open: Mutex<HashMap<String, mpsc::Sender<()>>>,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        DesktopNotifier {
            app_name: APP_NAME.to_string(),
            open: Mutex::new(HashMap::new()),
        }
    }
}

impl DesktopNotifier {
    fn build(&self, alert: &Alert) -> Notification {
        let millis = u32::try_from(alert.auto_dismiss.as_millis()).unwrap_or(u32::MAX);

        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(&alert.title)
            .body(&alert.body)
            .timeout(Timeout::Milliseconds(millis));

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            // Same tag, same id: the server replaces the earlier alert.
            notification
                .id(tag_id(&alert.tag))
                .hint(notify_rust::Hint::Resident(alert.require_interaction));
        }

        notification
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    // Blocking D-Bus round trip, made once per session when permission is
    // negotiated.
    #[cfg(all(unix, not(target_os = "macos")))]
    fn is_supported(&self) -> bool {
        notify_rust::get_server_information().is_ok()
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn is_supported(&self) -> bool {
        true
    }

    fn permission(&self) -> HostPermission {
        HostPermission::Granted
    }

    async fn request_permission(&self) -> HostPermission {
        HostPermission::Granted
    }

    fn show(&self, alert: &Alert) -> Result<(), NotifyError> {
        let notification = self.build(alert);
        let (shown_tx, shown_rx) = mpsc::channel::<Result<(), String>>();
        let (close_tx, close_rx) = mpsc::channel::<()>();

        thread::Builder::new()
            .name(format!("alert-{}", alert.tag))
            .spawn(move || match notification.show() {
                #[cfg(all(unix, not(target_os = "macos")))]
                Ok(handle) => {
                    let _ = shown_tx.send(Ok(()));
                    // A dropped sender means the alert was replaced or the
                    // notifier went away; leave the alert to the server then.
                    if close_rx.recv().is_ok() {
                        handle.close();
                    }
                }
                #[cfg(not(all(unix, not(target_os = "macos"))))]
                Ok(_) => {
                    let _ = shown_tx.send(Ok(()));
                    drop(close_rx);
                }
                Err(e) => {
                    let _ = shown_tx.send(Err(e.to_string()));
                }
            })
            .map_err(|e| NotifyError::Dispatch(format!("Could not start alert thread: {e}")))?;

        match shown_rx.recv_timeout(SHOW_TIMEOUT) {
            Ok(Ok(())) => {
                self.open
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .insert(alert.tag.clone(), close_tx);
                Ok(())
            }
            Ok(Err(e)) => Err(NotifyError::Dispatch(e)),
            Err(_) => Err(NotifyError::Dispatch(format!(
                "Notification server did not answer within {}s",
                SHOW_TIMEOUT.as_secs()
            ))),
        }
    }

    fn dismiss(&self, tag: &str) {
        let sender = self
            .open
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(tag);

        if let Some(sender) = sender {
            // Err: the alert thread already finished
            let _ = sender.send(());
        }
    }
}

/// Stable non-zero notification id for a tag.
#[cfg(all(unix, not(target_os = "macos")))]
fn tag_id(tag: &str) -> u32 {
    // FNV-1a; 0 asks the server for a fresh id
    let hash = tag
        .bytes()
        .fold(0x811c_9dc5_u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
    hash.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_tag_id_is_stable_and_non_zero() {
        assert_eq!(tag_id("e1"), tag_id("e1"));
        assert_ne!(tag_id("e1"), tag_id("e2"));
        assert_ne!(tag_id(""), 0);
    }

    #[test]
    fn test_dismiss_signals_open_alert_once() {
        let notifier = DesktopNotifier::default();
        let (close_tx, close_rx) = mpsc::channel();
        notifier
            .open
            .lock()
            .unwrap()
            .insert("e1".to_string(), close_tx);

        notifier.dismiss("e1");
        notifier.dismiss("e1");
        notifier.dismiss("unknown");

        assert_eq!(close_rx.try_recv(), Ok(()));
        // Sender was removed after the first dismissal.
        assert_eq!(close_rx.try_recv(), Err(mpsc::TryRecvError::Disconnected));
    }
}
