//! package.json manifest
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - optionalDependencies
//!
//! Every other key is kept as-is, in its original position.

use crate::domain::{DependencyGroup, DependencyMap};
use crate::error::ManifestError;
use crate::manifest::{read_manifest, write_manifest};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A parsed package.json document
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Read and parse a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = read_manifest(path)?;
        Self::parse(&content, path)
    }

    /// Parse manifest content; `path` is used for error messages and writing
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        let Value::Object(document) = value else {
            return Err(ManifestError::invalid_structure(
                &path,
                "top-level value must be an object",
            ));
        };

        for group in DependencyGroup::all() {
            validate_group(&path, *group, document.get(group.manifest_key()))?;
        }

        Ok(Self { path, document })
    }

    /// Path the manifest was loaded from and will be written to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the group key is present and not null
    pub fn has_group(&self, group: DependencyGroup) -> bool {
        !matches!(
            self.document.get(group.manifest_key()),
            None | Some(Value::Null)
        )
    }

    /// Returns the declared dependencies of a group, if present
    pub fn group(&self, group: DependencyGroup) -> Option<DependencyMap> {
        let object = self.document.get(group.manifest_key())?.as_object()?;
        Some(
            object
                .iter()
                .filter_map(|(name, spec)| spec.as_str().map(|spec| (name.clone(), spec)))
                .collect(),
        )
    }

    /// Replaces a group, keeping its key position when it already exists
    pub fn set_group(&mut self, group: DependencyGroup, dependencies: &DependencyMap) {
        let object: Map<String, Value> = dependencies
            .iter()
            .map(|(name, spec)| (name.to_string(), Value::String(spec.raw().to_string())))
            .collect();
        self.document
            .insert(group.manifest_key().to_string(), Value::Object(object));
    }

    /// Two-space indented JSON with a trailing newline
    pub fn to_pretty_string(&self) -> Result<String, ManifestError> {
        let mut content = serde_json::to_string_pretty(&self.document)
            .map_err(|e| ManifestError::invalid_structure(&self.path, e.to_string()))?;
        content.push('\n');
        Ok(content)
    }

    /// Serialize fully, then write in one go
    pub fn write(&self) -> Result<(), ManifestError> {
        let content = self.to_pretty_string()?;
        write_manifest(&self.path, &content)
    }
}

fn validate_group(
    path: &Path,
    group: DependencyGroup,
    value: Option<&Value>,
) -> Result<(), ManifestError> {
    let object = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(object)) => object,
        Some(_) => {
            return Err(ManifestError::invalid_structure(
                path,
                format!("\"{}\" must be an object", group.manifest_key()),
            ))
        }
    };

    match object.iter().find(|(_, spec)| !spec.is_string()) {
        Some((name, _)) => Err(ManifestError::invalid_structure(
            path,
            format!(
                "version of \"{}\" in \"{}\" must be a string",
                name,
                group.manifest_key()
            ),
        )),
        None => Ok(()),
    }
}
