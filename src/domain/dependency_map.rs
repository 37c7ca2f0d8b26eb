//! Ordered dependency maps

use super::VersionSpec;
use std::collections::HashMap;

/// Package name -> declared spec, in manifest order
///
/// Names are unique. Inserting an existing name replaces its spec in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    entries: Vec<(String, VersionSpec)>,
    index: HashMap<String, usize>,
}

impl DependencyMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the spec for a package
    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<VersionSpec>) {
        let name = name.into();
        let spec = spec.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = spec,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, spec));
            }
        }
    }

    /// Returns the spec declared for a package
    pub fn get(&self, name: &str) -> Option<&VersionSpec> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionSpec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, S> FromIterator<(N, S)> for DependencyMap
where
    N: Into<String>,
    S: Into<VersionSpec>,
{
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut map = DependencyMap::new();
        for (name, spec) in iter {
            map.insert(name, spec);
        }
        map
    }
}
