//! Host notification capability.
//!
//! A notifier reports whether the host can show notifications at all, what
//! the user has authorized, and shows and closes alerts. Permission prompts
//! may wait on the user, so `request_permission` is async; everything else
//! is not.

mod desktop;
mod logging;

pub use desktop::DesktopNotifier;
pub use logging::LogNotifier;

use async_trait::async_trait;

use crate::alert::Alert;
use crate::error::NotifyError;

/// Authorization as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPermission {
    /// The user has not been asked yet
    Default,
    Granted,
    Denied,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Current authorization, without prompting.
    fn permission(&self) -> HostPermission;

    /// Ask the user. Resolves to `Granted` or `Denied`.
    async fn request_permission(&self) -> HostPermission;

    fn show(&self, alert: &Alert) -> Result<(), NotifyError>;

    /// Close the alert shown under `tag`, if it is still up.
    fn dismiss(&self, tag: &str);
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn permission(&self) -> HostPermission {
        (**self).permission()
    }

    async fn request_permission(&self) -> HostPermission {
        (**self).request_permission().await
    }

    fn show(&self, alert: &Alert) -> Result<(), NotifyError> {
        (**self).show(alert)
    }

    fn dismiss(&self, tag: &str) {
        (**self).dismiss(tag)
    }
}
