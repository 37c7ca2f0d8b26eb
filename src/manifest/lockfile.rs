//! package-lock.json parsing
//!
//! - lockfile v2/v3: `packages` keyed by install path (`node_modules/foo`)
//! - lockfile v1: top-level `dependencies` keyed by package name

use crate::domain::{install_path, ResolvedVersionMap};
use crate::error::ManifestError;
use crate::manifest::read_manifest;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PackageLock {
    #[serde(rename = "lockfileVersion")]
    lockfile_version: Option<u64>,
    packages: Option<Map<String, Value>>,
    dependencies: Option<Map<String, Value>>,
}

fn entry_version(entry: &Value) -> Option<&str> {
    entry.get("version").and_then(Value::as_str)
}

/// Read and parse a lockfile from disk
pub fn load_lockfile(path: &Path) -> Result<ResolvedVersionMap, ManifestError> {
    let content = read_manifest(path)?;
    parse_lockfile(&content, path)
}

/// Parse lockfile content into install path -> version
pub fn parse_lockfile(content: &str, path: &Path) -> Result<ResolvedVersionMap, ManifestError> {
    let lock: PackageLock = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    let mut resolved = ResolvedVersionMap::new();

    if let Some(packages) = &lock.packages {
        for (key, entry) in packages {
            if let Some(version) = entry_version(entry) {
                resolved.insert(key.clone(), version);
            }
        }
    } else if let Some(dependencies) = &lock.dependencies {
        for (name, entry) in dependencies {
            if let Some(version) = entry_version(entry) {
                resolved.insert(install_path(name), version);
            }
        }
    }

    tracing::debug!(
        path = %path.display(),
        lockfile_version = ?lock.lockfile_version,
        entries = resolved.len(),
        "loaded lockfile"
    );

    Ok(resolved)
}
