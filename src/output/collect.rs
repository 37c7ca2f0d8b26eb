//! In-memory status collector

use crate::classify::ReportSection;
use crate::domain::VersionChange;
use crate::output::{StatusEvent, StatusSink};

/// Keeps every event for later inspection
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub events: Vec<StatusEvent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update notifications, in emission order
    pub fn updates(&self) -> Vec<&VersionChange> {
        self.events
            .iter()
            .filter_map(|event| match event {
                StatusEvent::Updated { change, .. } => Some(change),
                _ => None,
            })
            .collect()
    }

    /// Report sections, in emission order
    pub fn sections(&self) -> Vec<&ReportSection> {
        self.events
            .iter()
            .filter_map(|event| match event {
                StatusEvent::Section(section) => Some(section),
                _ => None,
            })
            .collect()
    }

    /// Warning messages, in emission order
    pub fn warnings(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                StatusEvent::Warning { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl StatusSink for CollectingSink {
    fn emit(&mut self, event: &StatusEvent) -> std::io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
