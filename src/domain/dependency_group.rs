//! Dependency group definitions for package.json

use serde::{Deserialize, Serialize};
use std::fmt;

/// The dependency objects of a package.json manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyGroup {
    /// `dependencies`
    Dependencies,
    /// `devDependencies`
    DevDependencies,
    /// `peerDependencies`
    PeerDependencies,
    /// `optionalDependencies`
    OptionalDependencies,
}

impl DependencyGroup {
    /// Returns the manifest key for this group
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyGroup::Dependencies => "dependencies",
            DependencyGroup::DevDependencies => "devDependencies",
            DependencyGroup::PeerDependencies => "peerDependencies",
            DependencyGroup::OptionalDependencies => "optionalDependencies",
        }
    }

    /// Returns the section title used in upgrade reports
    pub fn title(&self) -> &'static str {
        match self {
            DependencyGroup::Dependencies => "Dependencies",
            DependencyGroup::DevDependencies => "DevDependencies",
            DependencyGroup::PeerDependencies => "PeerDependencies",
            DependencyGroup::OptionalDependencies => "OptionalDependencies",
        }
    }

    /// Returns true if reconciliation writes this group even when absent
    ///
    /// Peer and optional groups are only touched when the manifest has them.
    pub fn always_reconciled(&self) -> bool {
        matches!(
            self,
            DependencyGroup::Dependencies | DependencyGroup::DevDependencies
        )
    }

    /// Returns all groups in manifest/report order
    pub fn all() -> &'static [DependencyGroup] {
        &[
            DependencyGroup::Dependencies,
            DependencyGroup::DevDependencies,
            DependencyGroup::PeerDependencies,
            DependencyGroup::OptionalDependencies,
        ]
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manifest_key())
    }
}
