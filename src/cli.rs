//! CLI argument parsing module for lockbump

use crate::history::DEFAULT_REFERENCE;
use crate::output::OutputConfig;
use crate::workflow::SyncOptions;
use clap::Parser;
use std::path::PathBuf;

/// Sync package.json caret ranges with package-lock.json
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lockbump",
    version,
    about = "Sync package.json caret ranges with the versions installed in package-lock.json"
)]
pub struct CliArgs {
    /// Git reference to compare the updated package.json against
    #[arg(default_value = DEFAULT_REFERENCE)]
    pub reference: String,

    /// Project directory containing package.json and package-lock.json
    #[arg(short = 'C', long, default_value = ".")]
    pub path: PathBuf,

    // General options
    /// Dry run mode - show what would be updated without writing package.json
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip the comparison with the previous git version
    #[arg(long)]
    pub no_compare: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - hide per-package update lines
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Reference to compare against; an empty argument means the default
    pub fn reference(&self) -> &str {
        if self.reference.is_empty() {
            DEFAULT_REFERENCE
        } else {
            &self.reference
        }
    }

    /// Workflow options for this invocation
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::new(&self.path)
            .with_reference(self.reference())
            .with_dry_run(self.dry_run)
            .with_compare(!self.no_compare)
    }

    /// Output configuration for this invocation
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_cli(self.json, self.verbose, self.quiet, self.no_color)
    }
}
