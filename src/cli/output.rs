//! Terminal rendering of scan and removal results

use crate::cleanup::{RemovalEvent, RemovalSummary};
use crate::core::ScanIssue;
use crate::ignore::scanner::ScanReport;
use colored::Colorize;
use std::path::Path;

pub fn print_scanning(root: &Path) {
    println!("Scanning directory: {}", root.display());
}

/// Print the ignored entries, directories first, each group sorted
pub fn print_listing(report: &ScanReport) {
    if report.is_empty() {
        println!("No ignored files or directories found.");
        return;
    }

    println!();
    println!("Found {} ignored item(s):", report.len());
    println!();

    let mut directories: Vec<&str> = report.directories().map(|e| e.path.as_str()).collect();
    directories.sort_unstable();
    let mut files: Vec<&str> = report.files().map(|e| e.path.as_str()).collect();
    files.sort_unstable();

    if !directories.is_empty() {
        println!("{}", "Directories:".bold());
        for path in directories {
            println!("  {}  {}/", "[DIR]".blue(), path);
        }
    }

    if !files.is_empty() {
        println!();
        println!("{}", "Files:".bold());
        for path in files {
            println!("  {} {}", "[FILE]".cyan(), path);
        }
    }

    println!();
}

/// Print non-fatal scan issues as warnings on stderr
pub fn print_issues(issues: &[ScanIssue]) {
    for issue in issues {
        eprintln!("{} {}", "Warning:".yellow().bold(), issue);
    }
}

/// Print one removal as it happens
pub fn print_removal(event: &RemovalEvent<'_>) {
    match event {
        RemovalEvent::Removed(entry) if entry.is_dir() => {
            println!("Deleted directory: {}/", entry.path);
        }
        RemovalEvent::Removed(entry) => {
            println!("Deleted file: {}", entry.path);
        }
        RemovalEvent::Failed { entry, error } => {
            let suffix = if entry.is_dir() { "/" } else { "" };
            eprintln!(
                "{} {}{}: {}",
                "Error deleting".red(),
                entry.path,
                suffix,
                error
            );
        }
    }
}

pub fn print_summary(summary: &RemovalSummary) {
    println!();
    println!(
        "Deleted {} file(s) and {} directory(ies).",
        summary.files, summary.directories
    );
}
