//! List command implementation

use crate::cli::commands::{prepare_root, scan_root};
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::config::CleanerConfig;
use anyhow::Result;
use std::path::Path;

/// Execute the list command
pub fn execute(directory: &Path, json: bool) -> Result<()> {
    let config = CleanerConfig::load()?;
    let root = prepare_root(directory, &config, true)?;

    if json {
        let report = scan_root(&root, &config)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let quiet = CliContext::is_quiet();
    if !quiet {
        output::print_scanning(&root);
    }

    let report = scan_root(&root, &config)?;
    output::print_issues(&report.issues);

    if !quiet {
        output::print_listing(&report);
    }

    Ok(())
}
