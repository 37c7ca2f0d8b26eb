//! Classification of declared version changes between two manifests
//!
//! Only packages present on both sides with a different spec are reported.
//! Each change lands in one bucket, decided on the first two dot-separated
//! tokens of the caret-stripped versions:
//! - major token differs -> major
//! - minor token differs -> minor
//! - otherwise -> patch

mod report;

pub use report::{Bucket, GroupReport, ReportSection, UpgradeReport};

use crate::domain::{DependencyGroup, DependencyMap, ParseOutcome, VersionChange, VersionSpec};
use crate::manifest::PackageManifest;

/// Decide the bucket for a spec change
pub fn bucket_for(previous: &VersionSpec, current: &VersionSpec) -> Bucket {
    let before = previous.tokens();
    let after = current.tokens();

    if before.comparison_outcome(&after) == ParseOutcome::Degraded {
        tracing::trace!(from = %previous, to = %current, "comparing non-numeric versions as text");
    }

    if !before.same_major(&after) {
        Bucket::Major
    } else if !before.same_minor(&after) {
        Bucket::Minor
    } else {
        Bucket::Patch
    }
}

/// Compare one dependency group between two revisions
pub fn classify(previous: &DependencyMap, current: &DependencyMap) -> GroupReport {
    let mut report = GroupReport::default();

    for (name, spec) in current.iter() {
        // An empty previous spec counts as not declared
        let Some(before) = previous.get(name).filter(|before| !before.raw().is_empty()) else {
            continue;
        };
        if before == spec {
            continue;
        }

        let change = VersionChange::new(name, before.clone(), spec.clone());
        report.push(bucket_for(before, spec), change);
    }

    report.sort();
    report
}

/// Compare every dependency group of two manifests
///
/// A group missing or empty on either side is skipped, and groups without
/// changes produce no section.
pub fn classify_manifests(previous: &PackageManifest, current: &PackageManifest) -> UpgradeReport {
    let mut report = UpgradeReport::default();

    for &group in DependencyGroup::all() {
        let (Some(before), Some(after)) = (previous.group(group), current.group(group)) else {
            continue;
        };
        if before.is_empty() || after.is_empty() {
            continue;
        }

        let changes = classify(&before, &after);
        if !changes.is_empty() {
            report.sections.push(ReportSection {
                group,
                changes,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> DependencyMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_major_change() {
        let report = classify(&map(&[("bar", "^1.0.0")]), &map(&[("bar", "^2.0.0")]));
        assert_eq!(report.major.len(), 1);
        assert_eq!(report.major[0].to_string(), "bar: ^1.0.0 → ^2.0.0");
        assert!(report.minor.is_empty());
        assert!(report.patch.is_empty());
    }

    #[test]
    fn test_minor_and_patch_changes() {
        let report = classify(
            &map(&[("a", "^1.0.0"), ("b", "^1.0.0")]),
            &map(&[("a", "^1.1.0"), ("b", "^1.0.1")]),
        );
        assert_eq!(report.minor.len(), 1);
        assert_eq!(report.minor[0].name, "a");
        assert_eq!(report.patch.len(), 1);
        assert_eq!(report.patch[0].name, "b");
    }

    #[test]
    fn test_caret_only_change_is_patch() {
        let report = classify(&map(&[("a", "1.2.3")]), &map(&[("a", "^1.2.3")]));
        assert_eq!(report.patch.len(), 1);
    }

    #[test]
    fn test_missing_minor_on_both_sides_is_patch() {
        let report = classify(&map(&[("a", "^1")]), &map(&[("a", "1")]));
        assert_eq!(report.patch.len(), 1);

        let report = classify(&map(&[("a", "^1")]), &map(&[("a", "^1.0")]));
        assert_eq!(report.minor.len(), 1);
    }

    #[test]
    fn test_unchanged_and_one_sided_are_skipped() {
        let report = classify(
            &map(&[("same", "^1.0.0"), ("removed", "^1.0.0")]),
            &map(&[("same", "^1.0.0"), ("added", "^1.0.0")]),
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let report = classify(
            &map(&[("zeta", "^1.0.0"), ("alpha", "^1.0.0"), ("Mid", "^1.0.0")]),
            &map(&[("zeta", "^2.0.0"), ("alpha", "^2.0.0"), ("Mid", "^2.0.0")]),
        );
        let names: Vec<_> = report.major.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_non_numeric_versions() {
        assert_eq!(
            bucket_for(&VersionSpec::new("latest"), &VersionSpec::new("next")),
            Bucket::Major
        );
        assert_eq!(
            bucket_for(&VersionSpec::new("^1.2.3-beta"), &VersionSpec::new("^1.2.3-rc")),
            Bucket::Patch
        );
    }

    #[test]
    fn test_empty_previous_spec_is_skipped() {
        let report = classify(
            &map(&[("a", ""), ("b", "^1.0.0")]),
            &map(&[("a", "^1.0.0"), ("b", "^1.1.0")]),
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report.minor[0].name, "b");
    }

    fn manifest(json: &str) -> PackageManifest {
        PackageManifest::parse(json, "package.json").unwrap()
    }

    #[test]
    fn test_classify_manifests_orders_groups() {
        let previous = manifest(
            r#"{
                "dependencies": {"a": "^1.0.0"},
                "devDependencies": {"b": "^1.0.0"},
                "optionalDependencies": {"c": "^1.0.0"}
            }"#,
        );
        let current = manifest(
            r#"{
                "optionalDependencies": {"c": "^1.1.0"},
                "devDependencies": {"b": "^2.0.0"},
                "dependencies": {"a": "^1.0.0"}
            }"#,
        );

        let report = classify_manifests(&previous, &current);
        let groups: Vec<_> = report.sections.iter().map(|s| s.group).collect();
        assert_eq!(
            groups,
            vec![
                DependencyGroup::DevDependencies,
                DependencyGroup::OptionalDependencies
            ]
        );
    }

    #[test]
    fn test_classify_manifests_skips_absent_group() {
        let previous = manifest(r#"{"dependencies": {"a": "^1.0.0"}}"#);
        let current = manifest(
            r#"{"dependencies": {"a": "^1.0.0"}, "peerDependencies": {"a": "^2.0.0"}}"#,
        );
        let report = classify_manifests(&previous, &current);
        assert!(report.is_empty());
    }

    #[test]
    fn test_classify_manifests_skips_empty_group() {
        let previous = manifest(
            r#"{"dependencies": {"a": "^1.0.0"}, "peerDependencies": {}}"#,
        );
        let current = manifest(
            r#"{"dependencies": {"a": "^1.1.0"}, "peerDependencies": {"a": "^2.0.0"}}"#,
        );
        let report = classify_manifests(&previous, &current);
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].group, DependencyGroup::Dependencies);

        let report = classify_manifests(&current, &previous);
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].group, DependencyGroup::Dependencies);
    }
}
