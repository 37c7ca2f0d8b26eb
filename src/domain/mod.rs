//! Core domain models for lockbump
//!
//! - Version specifications and their dot-separated tokens
//! - Ordered dependency maps and the package.json groups holding them
//! - Versions resolved by the lockfile
//! - Version change records

mod dependency_group;
mod dependency_map;
mod resolved;
mod version_change;
mod version_spec;

pub use dependency_group::DependencyGroup;
pub use dependency_map::DependencyMap;
pub use resolved::{install_path, ResolvedVersionMap, INSTALL_PREFIX};
pub use version_change::VersionChange;
pub use version_spec::{ParseOutcome, VersionSpec, VersionTokens, CARET};
