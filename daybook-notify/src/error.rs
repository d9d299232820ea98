//! Notification failures.
//!
//! None of these leave the engine: they are logged and the event is still
//! marked as notified.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notifications are not supported on this host")]
    UnsupportedCapability,

    #[error("Notification permission was denied")]
    PermissionDenied,

    #[error("Notification permission has not been granted yet")]
    PermissionPending,

    #[error("Failed to show notification: {0}")]
    Dispatch(String),
}
