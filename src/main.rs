//! lockbump - sync package.json caret ranges with package-lock.json
//!
//! Rewrites every `^x.y.z` range whose installed version shares its major,
//! then reports what moved compared to a previous git revision.

use clap::Parser;
use lockbump::cli::CliArgs;
use lockbump::history::GitHistory;
use lockbump::output::create_sink;
use lockbump::workflow::SyncWorkflow;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error updating package versions: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostic logging goes to stderr; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<()> {
    let options = args.sync_options();
    let output_config = args.output_config();

    if !output_config.color {
        colored::control::set_override(false);
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        path = %options.project_dir.display(),
        reference = %options.reference,
        dry_run = options.dry_run,
        "starting"
    );

    let history = GitHistory::new(&options.project_dir);
    let mut sink = create_sink(&output_config, Box::new(io::stdout()));

    let outcome = SyncWorkflow::new(options, &history).run(sink.as_mut())?;
    tracing::debug!(
        updates = outcome.updates.len(),
        written = outcome.written,
        "finished"
    );

    Ok(())
}
