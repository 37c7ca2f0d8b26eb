//! Manifest and lockfile handling
//!
//! This module provides:
//! - package.json loading, dependency group access and pretty-printed writing
//! - package-lock.json parsing into resolved versions (lockfile v1, v2 and v3)

mod lockfile;
mod package_json;
mod writer;

pub use lockfile::{load_lockfile, parse_lockfile};
pub use package_json::PackageManifest;
pub use writer::{read_manifest, write_manifest};

/// Manifest file name
pub const MANIFEST_FILENAME: &str = "package.json";

/// Lockfile file name
pub const LOCKFILE_FILENAME: &str = "package-lock.json";
