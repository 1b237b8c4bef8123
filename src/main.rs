//! gi-cleaner CLI
//!
//! Command-line interface for finding and removing ignored files.

use anyhow::Result;
use clap::Parser;
use gi_cleaner::cli::{self, context::CliContext, Cli, Commands};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose.
    // Scan issues are printed by the commands, so warnings stay quiet by default.
    let default_level = if cli.verbose { "info" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
        yes: cli.yes,
        dry_run: cli.dry_run,
    });

    // Execute the command
    match cli.command.unwrap_or(Commands::Clean) {
        Commands::Clean => cli::commands::clean::execute(&cli.directory),
        Commands::List { json } => cli::commands::list::execute(&cli.directory, json),
        Commands::Check { paths, json } => {
            cli::commands::check::execute(&cli.directory, &paths, json)
        }
        Commands::Config {
            key,
            value,
            list,
            unset,
            json,
        } => cli::commands::config::execute(key, value, list, unset, json),
    }
}
