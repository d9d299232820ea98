//! JSON event file.
//!
//! The organizer keeps its whole event list as one JSON array. The reminder
//! service only ever reads it; `save` exists for tooling and tests.

use std::path::{Path, PathBuf};

use crate::error::{DaybookError, DaybookResult};
use crate::event::ScheduledEvent;

#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EventStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every event in the file. A missing file is an empty list.
    pub fn load(&self) -> DaybookResult<Vec<ScheduledEvent>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            DaybookError::Store(format!("Could not parse {}: {e}", self.path.display()))
        })
    }

    /// Replace the file contents with `events`.
    pub fn save(&self, events: &[ScheduledEvent]) -> DaybookResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(events)
            .map_err(|e| DaybookError::Serialization(e.to_string()))?;

        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
