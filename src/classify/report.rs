//! Upgrade report types

use crate::domain::{DependencyGroup, VersionChange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification bucket for a reported change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Major,
    Minor,
    Patch,
}

impl Bucket {
    /// Heading used in text reports
    pub fn heading(&self) -> &'static str {
        match self {
            Bucket::Major => "Major changes",
            Bucket::Minor => "Minor changes",
            Bucket::Patch => "Patch changes",
        }
    }

    /// Returns all buckets in report order
    pub fn all() -> &'static [Bucket] {
        &[Bucket::Major, Bucket::Minor, Bucket::Patch]
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucket::Major => "major",
            Bucket::Minor => "minor",
            Bucket::Patch => "patch",
        };
        write!(f, "{}", label)
    }
}

/// Changes of one dependency group, split by bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub major: Vec<VersionChange>,
    pub minor: Vec<VersionChange>,
    pub patch: Vec<VersionChange>,
}

impl GroupReport {
    /// Adds a change to a bucket
    pub fn push(&mut self, bucket: Bucket, change: VersionChange) {
        match bucket {
            Bucket::Major => self.major.push(change),
            Bucket::Minor => self.minor.push(change),
            Bucket::Patch => self.patch.push(change),
        }
    }

    /// Sorts every bucket by package name
    pub fn sort(&mut self) {
        for bucket in [&mut self.major, &mut self.minor, &mut self.patch] {
            bucket.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Returns the changes of a bucket
    pub fn bucket(&self, bucket: Bucket) -> &[VersionChange] {
        match bucket {
            Bucket::Major => &self.major,
            Bucket::Minor => &self.minor,
            Bucket::Patch => &self.patch,
        }
    }

    /// Non-empty buckets in order major, minor, patch
    pub fn buckets(&self) -> impl Iterator<Item = (Bucket, &[VersionChange])> {
        Bucket::all()
            .iter()
            .map(|&bucket| (bucket, self.bucket(bucket)))
            .filter(|(_, changes)| !changes.is_empty())
    }

    pub fn len(&self) -> usize {
        self.major.len() + self.minor.len() + self.patch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A report section for one dependency group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub group: DependencyGroup,
    pub changes: GroupReport,
}

/// Changes across all dependency groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReport {
    pub sections: Vec<ReportSection>,
}

impl UpgradeReport {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of reported changes
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.changes.len()).sum()
    }

    /// Count of changes in a bucket across all groups
    pub fn count(&self, bucket: Bucket) -> usize {
        self.sections
            .iter()
            .map(|s| s.changes.bucket(bucket).len())
            .sum()
    }
}
