//! Versions resolved by the lockfile

use std::collections::HashMap;

/// Directory prefix npm uses for top-level install paths
pub const INSTALL_PREFIX: &str = "node_modules/";

/// Returns the lockfile install path for a top-level package
pub fn install_path(name: &str) -> String {
    format!("{INSTALL_PREFIX}{name}")
}

/// Install path (`node_modules/<name>`) -> installed exact version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVersionMap {
    packages: HashMap<String, String>,
}

impl ResolvedVersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the version installed at a lockfile path key
    pub fn insert(&mut self, path_key: impl Into<String>, version: impl Into<String>) {
        self.packages.insert(path_key.into(), version.into());
    }

    /// Returns the version installed for a top-level package
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.packages.get(&install_path(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ResolvedVersionMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ResolvedVersionMap::new();
        for (key, version) in iter {
            map.insert(key, version);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_path() {
        assert_eq!(install_path("foo"), "node_modules/foo");
        assert_eq!(install_path("@types/node"), "node_modules/@types/node");
    }

    #[test]
    fn test_version_of_top_level() {
        let resolved: ResolvedVersionMap = [
            ("node_modules/foo", "1.3.0"),
            ("node_modules/bar/node_modules/foo", "0.9.0"),
        ]
        .into_iter()
        .collect();

        assert_eq!(resolved.version_of("foo"), Some("1.3.0"));
        assert_eq!(resolved.version_of("bar"), None);
    }

    #[test]
    fn test_scoped_package() {
        let resolved: ResolvedVersionMap =
            [("node_modules/@scope/pkg", "2.1.0")].into_iter().collect();
        assert_eq!(resolved.version_of("@scope/pkg"), Some("2.1.0"));
    }
}
