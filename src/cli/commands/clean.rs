//! Clean command implementation

use crate::cleanup::{run_clean, AssumeYes, CleanOutcome, Confirm, FsRemover, RemovalEvent};
use crate::cli::commands::{prepare_root, scan_root};
use crate::cli::context::CliContext;
use crate::cli::interactive::TerminalConfirm;
use crate::cli::output;
use crate::config::CleanerConfig;
use anyhow::Result;
use std::path::Path;

/// Execute the clean command
pub fn execute(directory: &Path) -> Result<()> {
    let config = CleanerConfig::load()?;
    let root = prepare_root(directory, &config, true)?;
    let quiet = CliContext::is_quiet();

    if !quiet {
        output::print_scanning(&root);
    }

    let report = scan_root(&root, &config)?;
    output::print_issues(&report.issues);

    if !quiet {
        output::print_listing(&report);
    }

    let mut confirm: Box<dyn Confirm> = if CliContext::is_yes() || !config.confirm() {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    };

    let outcome = run_clean(
        &report,
        CliContext::is_dry_run(),
        confirm.as_mut(),
        &FsRemover,
        |event| {
            if !quiet || matches!(event, RemovalEvent::Failed { .. }) {
                output::print_removal(event);
            }
        },
    )?;

    match outcome {
        CleanOutcome::NothingToClean => {}
        CleanOutcome::DryRun(_) => {
            println!("Dry run mode - no files were deleted.");
        }
        CleanOutcome::Cancelled => {
            println!("Deletion cancelled.");
        }
        CleanOutcome::Removed(summary) => {
            output::print_summary(&summary);
        }
    }

    Ok(())
}
