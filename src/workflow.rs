//! Sync workflow coordinating the whole run
//!
//! This module provides:
//! - Workflow coordination: load → reconcile → write → compare → report
//! - Dry-run mode support
//! - Fatal handling for manifest/lockfile problems
//! - Advisory handling for history problems

use crate::classify::{classify_manifests, UpgradeReport};
use crate::error::{AppError, HistoryError};
use crate::history::{HistoryProvider, DEFAULT_REFERENCE};
use crate::manifest::{load_lockfile, PackageManifest, LOCKFILE_FILENAME, MANIFEST_FILENAME};
use crate::output::{StatusEvent, StatusSink};
use crate::reconcile::{reconcile_manifest, GroupUpdate};
use std::path::PathBuf;

/// Options for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Directory holding package.json and package-lock.json
    pub project_dir: PathBuf,
    /// Revision the manifest is compared against
    pub reference: String,
    /// Compute everything but leave package.json untouched
    pub dry_run: bool,
    /// Compare against the previous revision after writing
    pub compare: bool,
}

impl SyncOptions {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            reference: DEFAULT_REFERENCE.to_string(),
            dry_run: false,
            compare: true,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(MANIFEST_FILENAME)
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.project_dir.join(LOCKFILE_FILENAME)
    }
}

/// Result of a completed sync run
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The reconciled manifest
    pub manifest: PackageManifest,
    /// Rewritten specs
    pub updates: Vec<GroupUpdate>,
    /// Whether package.json was written
    pub written: bool,
    /// Upgrade report, when the comparison ran
    pub report: Option<UpgradeReport>,
    /// Why the comparison was skipped, when it was
    pub warning: Option<HistoryError>,
}

impl SyncOutcome {
    pub fn has_updates(&self) -> bool {
        !self.updates.is_empty()
    }
}

/// Sync workflow over a project directory
pub struct SyncWorkflow<'a> {
    options: SyncOptions,
    history: &'a dyn HistoryProvider,
}

impl<'a> SyncWorkflow<'a> {
    pub fn new(options: SyncOptions, history: &'a dyn HistoryProvider) -> Self {
        Self { options, history }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run the workflow, reporting progress to `sink`
    ///
    /// Only manifest/lockfile problems, and sink failures before the manifest
    /// is written, are returned as errors. History problems end up in
    /// [`SyncOutcome::warning`].
    pub fn run(&self, sink: &mut dyn StatusSink) -> Result<SyncOutcome, AppError> {
        // Step 1: Load manifest and lockfile
        let manifest_path = self.options.manifest_path();
        let manifest = PackageManifest::load(&manifest_path)?;
        let resolved = load_lockfile(&self.options.lockfile_path())?;

        // Step 2: Reconcile every group
        let reconciliation = reconcile_manifest(&manifest, &resolved);
        for update in &reconciliation.updates {
            sink.emit(&StatusEvent::Updated {
                group: update.group,
                change: update.change.clone(),
            })?;
        }
        tracing::debug!(updates = reconciliation.updates.len(), "reconciled manifest");

        // Step 3: Persist (unless dry-run)
        let written = !self.options.dry_run;
        if written {
            reconciliation.manifest.write()?;
        }

        // From here on the run has succeeded; output failures are only logged
        emit_best_effort(
            sink,
            &StatusEvent::Written {
                path: manifest_path,
                dry_run: self.options.dry_run,
            },
        );

        let mut outcome = SyncOutcome {
            manifest: reconciliation.manifest,
            updates: reconciliation.updates,
            written,
            report: None,
            warning: None,
        };

        // Step 4: Compare with the previous revision
        if self.options.compare {
            emit_best_effort(
                sink,
                &StatusEvent::Comparing {
                    reference: self.options.reference.clone(),
                },
            );

            match self.compare(&outcome.manifest) {
                Ok(report) => {
                    for section in &report.sections {
                        emit_best_effort(sink, &StatusEvent::Section(section.clone()));
                    }
                    outcome.report = Some(report);
                }
                Err(err) => {
                    tracing::debug!(error = %err, "skipping comparison");
                    emit_best_effort(
                        sink,
                        &StatusEvent::Warning {
                            message: err.advisory(),
                        },
                    );
                    outcome.warning = Some(err);
                }
            }
        }

        if let Err(err) = sink.finish() {
            tracing::warn!(error = %err, "failed to flush status output");
        }
        Ok(outcome)
    }

    /// Classify the reconciled manifest against the previous revision
    fn compare(&self, current: &PackageManifest) -> Result<UpgradeReport, HistoryError> {
        let reference = &self.options.reference;
        let content = self.history.previous_manifest(reference)?;

        let origin = format!("{}:{}", reference, MANIFEST_FILENAME);
        let previous = PackageManifest::parse(&content, origin)
            .map_err(|e| HistoryError::snapshot(reference.as_str(), e.to_string()))?;

        Ok(classify_manifests(&previous, current))
    }
}

fn emit_best_effort(sink: &mut dyn StatusSink, event: &StatusEvent) {
    if let Err(err) = sink.emit(event) {
        tracing::warn!(error = %err, "failed to write status output");
    }
}
