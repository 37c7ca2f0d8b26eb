//! Version specification types for declared dependency ranges
//!
//! Only two shapes carry meaning here:
//! - exact versions: `1.2.3`
//! - caret ranges: `^1.2.3`
//!
//! Every other spec (`~1.2.3`, `>=1.0.0`, `latest`, git URLs, ...) is treated
//! like an exact version: it is kept verbatim and never rewritten.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a caret ("compatible with") range
pub const CARET: char = '^';

/// How well a version string matched the `major.minor.patch` shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseOutcome {
    /// At least three dot-separated tokens, the first three purely numeric
    Strict,
    /// Anything else; tokens are still extracted and compared as text
    Degraded,
}

/// Dot-separated tokens of a version string
///
/// Parsing never fails. A string without dots yields the whole string as
/// `major`, and missing `minor`/`patch` tokens are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTokens<'a> {
    pub major: &'a str,
    pub minor: Option<&'a str>,
    pub patch: Option<&'a str>,
    pub outcome: ParseOutcome,
}

impl<'a> VersionTokens<'a> {
    /// Split a bare version (no caret) into its leading tokens
    pub fn parse(version: &'a str) -> Self {
        let mut parts = version.split('.');
        let major = parts.next().unwrap_or(version);
        let minor = parts.next();
        let patch = parts.next();

        let numeric = |token: Option<&str>| {
            token.is_some_and(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        };
        let outcome = if numeric(Some(major)) && numeric(minor) && numeric(patch) {
            ParseOutcome::Strict
        } else {
            ParseOutcome::Degraded
        };

        Self {
            major,
            minor,
            patch,
            outcome,
        }
    }

    /// Returns true if the version matched `major.minor.patch` exactly
    pub fn is_strict(&self) -> bool {
        self.outcome == ParseOutcome::Strict
    }

    /// Outcome of comparing two versions: strict only when both are strict
    ///
    /// Comparisons always use the text tokens; a degraded outcome only means
    /// at least one side was not plain `major.minor.patch`.
    pub fn comparison_outcome(&self, other: &VersionTokens<'_>) -> ParseOutcome {
        if self.is_strict() && other.is_strict() {
            ParseOutcome::Strict
        } else {
            ParseOutcome::Degraded
        }
    }

    /// Major tokens compared as plain strings
    pub fn same_major(&self, other: &VersionTokens<'_>) -> bool {
        self.major == other.major
    }

    /// Minor tokens compared as plain strings; two absent minors are equal
    pub fn same_minor(&self, other: &VersionTokens<'_>) -> bool {
        self.minor == other.minor
    }
}

/// A declared version specification, stored exactly as written in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionSpec {
    raw: String,
}

impl VersionSpec {
    /// Wraps a raw spec string
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Builds a caret range for a resolved version (`1.3.0` -> `^1.3.0`)
    pub fn caret(version: &str) -> Self {
        Self::new(format!("{CARET}{version}"))
    }

    /// The spec exactly as declared
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true for caret ranges (eligible for reconciliation)
    pub fn is_caret(&self) -> bool {
        self.raw.starts_with(CARET)
    }

    /// The version with a leading caret stripped
    pub fn version(&self) -> &str {
        self.raw.strip_prefix(CARET).unwrap_or(&self.raw)
    }

    /// Dot-separated tokens of [`VersionSpec::version`]
    pub fn tokens(&self) -> VersionTokens<'_> {
        VersionTokens::parse(self.version())
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for VersionSpec {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for VersionSpec {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
