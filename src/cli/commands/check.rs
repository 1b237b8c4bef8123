//! Check command implementation

use crate::cli::commands::prepare_root;
use crate::config::CleanerConfig;
use crate::ignore::checker::{IgnoreChecker, MatchDecision};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the check command
pub fn execute(directory: &Path, paths: &[PathBuf], json: bool) -> Result<()> {
    let config = CleanerConfig::load()?;
    let root = prepare_root(directory, &config, false)?;
    let mut checker = IgnoreChecker::new(&root).ignore_file_name(config.ignore_file_name());

    let mut results = Vec::new();
    for path in paths {
        let decision = checker.check(path)?;
        let (status, rule) = match &decision {
            MatchDecision::Ignored(rule) => ("ignored", Some(rule.to_string())),
            MatchDecision::Whitelisted(rule) => ("whitelisted", Some(rule.to_string())),
            MatchDecision::Included => ("included", None),
            MatchDecision::VcsMetadata => ("vcs_metadata", None),
        };

        if json {
            results.push(serde_json::json!({
                "path": path.display().to_string(),
                "status": status,
                "rule": rule,
            }));
            continue;
        }

        let shown = path.display().to_string();
        match decision {
            MatchDecision::Ignored(rule) => {
                println!("{} {}  {}", "ignored".red(), shown.bold(), rule.to_string().dimmed());
            }
            MatchDecision::Whitelisted(rule) => {
                println!(
                    "{} {}  {}",
                    "not ignored".green(),
                    shown.bold(),
                    rule.to_string().dimmed()
                );
            }
            MatchDecision::Included => {
                println!("{} {}", "not ignored".green(), shown.bold());
            }
            MatchDecision::VcsMetadata => {
                println!("{} {}  {}", "skipped".yellow(), shown.bold(), "(version control)".dimmed());
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
