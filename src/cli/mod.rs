//! Command-line interface for gi-cleaner

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod context;
pub mod interactive;
pub mod output;

/// gi-cleaner - remove files ignored by .gitignore
#[derive(Parser)]
#[command(
    name = "gi-cleaner",
    version,
    about = "Find and remove files and directories ignored by .gitignore",
    long_about = "gi-cleaner walks a directory tree, applies every .gitignore it finds with Git's own matching rules, lists what is ignored and deletes it after confirmation."
)]
pub struct Cli {
    /// Directory to clean
    #[arg(short, long, default_value = ".", global = true, env = "GI_CLEANER_DIR")]
    pub directory: PathBuf,

    /// Show what would be deleted without deleting
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto", global = true)]
    pub color: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List ignored entries, confirm, then delete them (default)
    Clean,

    /// List ignored entries without deleting anything
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain the ignore decision for each path
    Check {
        /// Paths relative to the directory, or absolute paths inside it
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get and set configuration values
    Config {
        /// Configuration key to get/set
        key: Option<String>,
        /// Configuration value to set
        value: Option<String>,
        /// List all configuration values
        #[arg(short, long)]
        list: bool,
        /// Unset a configuration value
        #[arg(long)]
        unset: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
