//! Reconciliation of declared caret ranges with lockfile versions
//!
//! A declared spec is rewritten to `^<resolved>` only when:
//! - it is a caret range,
//! - the lockfile has a top-level install for the package,
//! - the installed version differs from the declared one,
//! - and both share the same major token.
//!
//! Everything else is copied through untouched.

use crate::domain::{
    DependencyGroup, DependencyMap, ParseOutcome, ResolvedVersionMap, VersionChange, VersionSpec,
};
use crate::manifest::PackageManifest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a declared spec was left alone, or what it becomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    /// Not a caret range; treated as pinned
    NotCaret,
    /// No top-level install recorded in the lockfile
    NotInstalled,
    /// Installed version already matches the declared one
    UpToDate,
    /// Installed major differs from the declared major
    MajorMismatch { installed: String },
    /// Rewrite to a caret range on the installed version
    Update { to: VersionSpec },
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::NotCaret => write!(f, "not a caret range"),
            Decision::NotInstalled => write!(f, "not installed"),
            Decision::UpToDate => write!(f, "up to date"),
            Decision::MajorMismatch { installed } => {
                write!(f, "installed {} crosses a major version", installed)
            }
            Decision::Update { to } => write!(f, "update to {}", to),
        }
    }
}

/// Result of reconciling one dependency map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// The reconciled map, in the declared order
    pub dependencies: DependencyMap,
    /// One entry per rewritten spec, in the declared order
    pub updates: Vec<VersionChange>,
}

impl Reconciliation {
    pub fn has_updates(&self) -> bool {
        !self.updates.is_empty()
    }
}

/// Decides and applies spec rewrites against a fixed set of resolved versions
pub struct Reconciler<'a> {
    resolved: &'a ResolvedVersionMap,
}

impl<'a> Reconciler<'a> {
    pub fn new(resolved: &'a ResolvedVersionMap) -> Self {
        Self { resolved }
    }

    /// Decide what should happen to a single declared spec
    pub fn judge(&self, name: &str, declared: &VersionSpec) -> Decision {
        if !declared.is_caret() {
            return Decision::NotCaret;
        }

        let Some(installed) = self.resolved.version_of(name) else {
            return Decision::NotInstalled;
        };

        let current = declared.version();
        if installed == current {
            return Decision::UpToDate;
        }

        let installed_spec = VersionSpec::caret(installed);
        let (before, after) = (declared.tokens(), installed_spec.tokens());
        if before.comparison_outcome(&after) == ParseOutcome::Degraded {
            tracing::trace!(package = name, declared = %declared, installed, "comparing non-numeric versions as text");
        }
        if !before.same_major(&after) {
            return Decision::MajorMismatch {
                installed: installed.to_string(),
            };
        }

        Decision::Update { to: installed_spec }
    }

    /// Build a new map with every eligible spec rewritten
    pub fn reconcile(&self, declared: &DependencyMap) -> Reconciliation {
        let mut result = Reconciliation::default();

        for (name, spec) in declared.iter() {
            match self.judge(name, spec) {
                Decision::Update { to } => {
                    tracing::debug!(package = name, from = %spec, to = %to, "rewriting caret range");
                    result
                        .updates
                        .push(VersionChange::new(name, spec.clone(), to.clone()));
                    result.dependencies.insert(name, to);
                }
                decision => {
                    tracing::trace!(package = name, spec = %spec, %decision, "keeping declared spec");
                    result.dependencies.insert(name, spec.clone());
                }
            }
        }

        result
    }
}

/// Reconcile a declared map against resolved versions
pub fn reconcile(declared: &DependencyMap, resolved: &ResolvedVersionMap) -> Reconciliation {
    Reconciler::new(resolved).reconcile(declared)
}

/// A rewritten spec together with the group it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdate {
    pub group: DependencyGroup,
    pub change: VersionChange,
}

/// Result of reconciling a whole manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestReconciliation {
    /// Copy of the input manifest with every group reconciled
    pub manifest: PackageManifest,
    /// Rewritten specs, group by group in manifest order
    pub updates: Vec<GroupUpdate>,
}

/// Reconcile every dependency group of a manifest
///
/// `dependencies` and `devDependencies` are always written back (an absent
/// group becomes an empty object); peer and optional groups only when present.
pub fn reconcile_manifest(
    manifest: &PackageManifest,
    resolved: &ResolvedVersionMap,
) -> ManifestReconciliation {
    let reconciler = Reconciler::new(resolved);
    let mut reconciled = manifest.clone();
    let mut updates = Vec::new();

    for &group in DependencyGroup::all() {
        let declared = match manifest.group(group) {
            Some(declared) => declared,
            None if group.always_reconciled() => DependencyMap::new(),
            None => continue,
        };

        let result = reconciler.reconcile(&declared);
        reconciled.set_group(group, &result.dependencies);
        updates.extend(
            result
                .updates
                .into_iter()
                .map(|change| GroupUpdate { group, change }),
        );
    }

    ManifestReconciliation {
        manifest: reconciled,
        updates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(entries: &[(&str, &str)]) -> DependencyMap {
        entries.iter().copied().collect()
    }

    fn resolved(entries: &[(&str, &str)]) -> ResolvedVersionMap {
        entries
            .iter()
            .map(|(name, version)| (format!("node_modules/{}", name), *version))
            .collect()
    }

    #[test]
    fn test_minor_bump_is_applied() {
        let result = reconcile(
            &declared(&[("foo", "^1.2.0")]),
            &resolved(&[("foo", "1.3.0")]),
        );

        assert_eq!(result.dependencies, declared(&[("foo", "^1.3.0")]));
        assert_eq!(result.updates.len(), 1);
        assert_eq!(result.updates[0].name, "foo");
        assert_eq!(result.updates[0].from.raw(), "^1.2.0");
        assert_eq!(result.updates[0].to.raw(), "^1.3.0");
    }

    #[test]
    fn test_major_mismatch_is_kept() {
        let input = declared(&[("foo", "^1.2.0")]);
        let result = reconcile(&input, &resolved(&[("foo", "2.0.0")]));

        assert_eq!(result.dependencies, input);
        assert!(result.updates.is_empty());
    }

    #[test]
    fn test_exact_spec_is_untouched() {
        let input = declared(&[("foo", "1.2.0"), ("bar", "~1.0.0"), ("baz", ">=2.0.0")]);
        let result = reconcile(
            &input,
            &resolved(&[("foo", "1.3.0"), ("bar", "1.0.5"), ("baz", "2.1.0")]),
        );

        assert_eq!(result.dependencies, input);
        assert!(!result.has_updates());
    }

    #[test]
    fn test_missing_install_is_untouched() {
        let input = declared(&[("foo", "^1.2.0")]);
        let result = reconcile(&input, &ResolvedVersionMap::new());

        assert_eq!(result.dependencies, input);
        assert!(result.updates.is_empty());
    }

    #[test]
    fn test_nested_install_is_ignored() {
        let input = declared(&[("foo", "^1.2.0")]);
        let lock: ResolvedVersionMap = [("node_modules/bar/node_modules/foo", "1.9.0")]
            .into_iter()
            .collect();
        let result = reconcile(&input, &lock);

        assert_eq!(result.dependencies, input);
    }

    #[test]
    fn test_equal_version_is_up_to_date() {
        let lock = resolved(&[("foo", "1.2.0")]);
        let reconciler = Reconciler::new(&lock);
        assert_eq!(
            reconciler.judge("foo", &VersionSpec::new("^1.2.0")),
            Decision::UpToDate
        );
    }

    #[test]
    fn test_downgrade_within_major_is_applied() {
        // Only major equality matters; direction is not checked
        let result = reconcile(
            &declared(&[("foo", "^1.5.0")]),
            &resolved(&[("foo", "1.4.2")]),
        );
        assert_eq!(result.dependencies.get("foo").unwrap().raw(), "^1.4.2");
    }

    #[test]
    fn test_malformed_versions_compare_as_text() {
        let lock = resolved(&[("weird", "beta"), ("tagged", "1-rc")]);
        let reconciler = Reconciler::new(&lock);

        assert_eq!(
            reconciler.judge("weird", &VersionSpec::new("^alpha")),
            Decision::MajorMismatch {
                installed: "beta".to_string()
            }
        );
        assert_eq!(
            reconciler.judge("tagged", &VersionSpec::new("^1-beta")),
            Decision::MajorMismatch {
                installed: "1-rc".to_string()
            }
        );
    }

    #[test]
    fn test_prerelease_same_major_is_applied() {
        let result = reconcile(
            &declared(&[("next", "^14.0.0-canary.1")]),
            &resolved(&[("next", "14.0.0-canary.9")]),
        );
        assert_eq!(
            result.dependencies.get("next").unwrap().raw(),
            "^14.0.0-canary.9"
        );
    }

    #[test]
    fn test_preserves_order_and_input() {
        let input = declared(&[("zod", "^3.0.0"), ("axios", "^1.0.0"), ("lodash", "4.17.21")]);
        let snapshot = input.clone();
        let result = reconcile(
            &input,
            &resolved(&[("zod", "3.22.4"), ("axios", "1.6.0"), ("lodash", "4.17.21")]),
        );

        assert_eq!(input, snapshot);
        let names: Vec<_> = result.dependencies.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zod", "axios", "lodash"]);
        let updated: Vec<_> = result.updates.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(updated, vec!["zod", "axios"]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let lock = resolved(&[("a", "1.4.0"), ("b", "3.0.0"), ("c", "0.2.1")]);
        let input = declared(&[("a", "^1.2.0"), ("b", "^2.0.0"), ("c", "0.2.0")]);

        let once = reconcile(&input, &lock);
        let twice = reconcile(&once.dependencies, &lock);

        assert_eq!(once.dependencies, twice.dependencies);
        assert!(twice.updates.is_empty());
    }

    #[test]
    fn test_scoped_package() {
        let result = reconcile(
            &declared(&[("@types/node", "^20.0.0")]),
            &resolved(&[("@types/node", "20.10.0")]),
        );
        assert_eq!(
            result.dependencies.get("@types/node").unwrap().raw(),
            "^20.10.0"
        );
    }

    fn manifest(json: &str) -> PackageManifest {
        PackageManifest::parse(json, "package.json").unwrap()
    }

    #[test]
    fn test_reconcile_manifest_groups() {
        let input = manifest(
            r#"{
                "name": "demo",
                "dependencies": {"foo": "^1.2.0"},
                "devDependencies": {"jest": "^29.0.0"},
                "peerDependencies": {"react": "^18.0.0"}
            }"#,
        );
        let lock = resolved(&[("foo", "1.3.0"), ("jest", "29.7.0"), ("react", "18.2.0")]);

        let result = reconcile_manifest(&input, &lock);

        let groups: Vec<_> = result.updates.iter().map(|u| u.group).collect();
        assert_eq!(
            groups,
            vec![
                DependencyGroup::Dependencies,
                DependencyGroup::DevDependencies,
                DependencyGroup::PeerDependencies
            ]
        );
        let peers = result
            .manifest
            .group(DependencyGroup::PeerDependencies)
            .unwrap();
        assert_eq!(peers.get("react").unwrap().raw(), "^18.2.0");
        assert!(!result
            .manifest
            .has_group(DependencyGroup::OptionalDependencies));

        // Input manifest is left untouched
        let original = input.group(DependencyGroup::Dependencies).unwrap();
        assert_eq!(original.get("foo").unwrap().raw(), "^1.2.0");
    }

    #[test]
    fn test_reconcile_manifest_adds_missing_direct_groups() {
        let input = manifest(r#"{"name": "demo"}"#);
        let result = reconcile_manifest(&input, &ResolvedVersionMap::new());

        assert!(result.updates.is_empty());
        assert!(result.manifest.has_group(DependencyGroup::Dependencies));
        assert!(result.manifest.has_group(DependencyGroup::DevDependencies));
        assert!(!result.manifest.has_group(DependencyGroup::PeerDependencies));
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(Decision::NotCaret.to_string(), "not a caret range");
        assert_eq!(
            Decision::Update {
                to: VersionSpec::new("^1.3.0")
            }
            .to_string(),
            "update to ^1.3.0"
        );
    }
}
