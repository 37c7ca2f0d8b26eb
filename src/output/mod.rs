//! Status output for sync runs
//!
//! This module provides:
//! - A sink trait receiving status events from the workflow
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - An in-memory collector for tests and embedding

mod collect;
mod json;
mod text;

pub use collect::CollectingSink;
pub use json::JsonSink;
pub use text::TextSink;

use crate::classify::ReportSection;
use crate::domain::{DependencyGroup, VersionChange};
use std::io::Write;
use std::path::PathBuf;

/// A single observable step of a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// A declared spec was rewritten
    Updated {
        group: DependencyGroup,
        change: VersionChange,
    },
    /// Reconciliation finished; the manifest was written unless dry-run
    Written { path: PathBuf, dry_run: bool },
    /// Comparison against a previous revision started
    Comparing { reference: String },
    /// One dependency group of the upgrade report
    Section(ReportSection),
    /// The comparison was skipped
    Warning { message: String },
}

/// Receiver of status events
pub trait StatusSink {
    /// Handle one event
    fn emit(&mut self, event: &StatusEvent) -> std::io::Result<()>;

    /// Flush anything buffered once the run is over
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only the final status, report and warnings
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Normal output plus diagnostic logging
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: !no_color,
        }
    }
}

/// Create a status sink based on configuration
pub fn create_sink(config: &OutputConfig, writer: Box<dyn Write>) -> Box<dyn StatusSink> {
    match config.format {
        OutputFormat::Text => Box::new(TextSink::new(writer, config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonSink::new(writer)),
    }
}
