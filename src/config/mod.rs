//! Configuration management for gi-cleaner
//!
//! Settings live in ~/.gi-cleaner/config.toml and are read and written with
//! `gi-cleaner config`, in the style of `git config`.

pub mod cleaner_config;

// Re-export commonly used items
pub use cleaner_config::{CleanConfig, CleanerConfig, ConfigKey, ConfigValue, ScanConfig};
