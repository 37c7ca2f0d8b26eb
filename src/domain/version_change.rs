//! Version change records shared by reconciliation and reporting

use super::VersionSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A package whose declared spec moved from one value to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    /// Package name
    pub name: String,
    /// Spec before the change
    pub from: VersionSpec,
    /// Spec after the change
    pub to: VersionSpec,
}

impl VersionChange {
    pub fn new(name: impl Into<String>, from: VersionSpec, to: VersionSpec) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }
}

impl fmt::Display for VersionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} → {}", self.name, self.from, self.to)
    }
}
