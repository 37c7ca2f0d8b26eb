//! Retrieval of a previous manifest revision from version control
//!
//! This module provides:
//! - A provider trait so the workflow can be driven without a real repository
//! - A git implementation based on `git show <reference>:./package.json`

use crate::error::HistoryError;
use crate::manifest::MANIFEST_FILENAME;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Default reference to compare against
pub const DEFAULT_REFERENCE: &str = "main";

/// Walk up from `dir` to the first directory holding a `.git` entry
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn find_repository_root(dir: &Path) -> Option<PathBuf> {
    let dir = dir.canonicalize().ok()?;
    dir.ancestors()
        .find(|candidate| candidate.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Source of previous manifest revisions
pub trait HistoryProvider {
    /// Return the raw manifest content at a reference
    fn previous_manifest(&self, reference: &str) -> Result<String, HistoryError>;
}

/// History provider backed by the `git` command line
#[derive(Debug, Clone)]
pub struct GitHistory {
    /// Project directory (where package.json lives)
    project_dir: PathBuf,
}

impl GitHistory {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Project directory git commands run in
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Reject references git would read as options or that cannot name a revision
    fn validate_reference(reference: &str) -> Result<(), HistoryError> {
        if reference.trim().is_empty() {
            return Err(HistoryError::invalid_reference(
                reference,
                "reference is empty",
            ));
        }
        if reference.starts_with('-') {
            return Err(HistoryError::invalid_reference(
                reference,
                "reference must not start with '-'",
            ));
        }
        if let Some(ch) = reference
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || *c == ':')
        {
            return Err(HistoryError::invalid_reference(
                reference,
                format!("reference contains invalid character {:?}", ch),
            ));
        }
        Ok(())
    }

    fn run_git(&self, args: &[&str]) -> Result<Output, HistoryError> {
        tracing::debug!(dir = %self.project_dir.display(), args = ?args, "running git");
        Command::new("git")
            .current_dir(&self.project_dir)
            .args(args)
            .output()
            .map_err(|e| {
                HistoryError::command_failed(
                    format!("git {}", args.first().copied().unwrap_or_default()),
                    format!("failed to execute git: {e}"),
                )
            })
    }

    /// Map a failed `git show` to the matching error
    fn classify_failure(&self, reference: &str, output: &Output) -> HistoryError {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let lowered = stderr.to_lowercase();

        if lowered.contains("not a git repository") {
            HistoryError::not_a_repository(&self.project_dir)
        } else if lowered.contains("does not exist in")
            || lowered.contains("exists on disk, but not in")
            || lowered.contains("not in the working tree")
        {
            HistoryError::not_tracked(MANIFEST_FILENAME, reference)
        } else if lowered.contains("invalid object name")
            || lowered.contains("unknown revision")
            || lowered.contains("bad revision")
        {
            HistoryError::invalid_reference(reference, stderr.trim())
        } else {
            let message = match stderr.trim() {
                "" => output.status.to_string(),
                trimmed => trimmed.to_string(),
            };
            HistoryError::command_failed("git show", message)
        }
    }
}

impl HistoryProvider for GitHistory {
    fn previous_manifest(&self, reference: &str) -> Result<String, HistoryError> {
        Self::validate_reference(reference)?;

        if find_repository_root(&self.project_dir).is_none() {
            return Err(HistoryError::not_a_repository(&self.project_dir));
        }

        let object = format!("{reference}:./{MANIFEST_FILENAME}");
        let output = self.run_git(&["show", &object])?;

        if !output.status.success() {
            return Err(self.classify_failure(reference, &output));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| HistoryError::snapshot(reference, e.to_string()))
    }
}
