use async_trait::async_trait;

use super::{HostPermission, Notifier};
use crate::alert::Alert;
use crate::error::NotifyError;

/// Writes alerts to the log instead of the screen. Used for `--dry-run`.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
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
        log::info!(
            "[{}] {}: {}",
            alert.tag,
            alert.title,
            alert.body.replace('\n', " | ")
        );
        Ok(())
    }

    fn dismiss(&self, tag: &str) {
        log::debug!("[{tag}] dismissed");
    }
}
