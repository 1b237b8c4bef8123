//! Configuration command implementation

use crate::config::{CleanerConfig, ConfigKey};
use anyhow::Result;
use colored::Colorize;

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    json: bool,
) -> Result<()> {
    let mut config = CleanerConfig::load()?;

    if list {
        return list_configuration(&config, json);
    }

    let Some(key_str) = key else {
        print_usage(json);
        return Ok(());
    };

    let config_key = ConfigKey::parse(&key_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {}", key_str))?;

    if unset {
        config.unset(config_key);
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "unset",
                    "key": key_str,
                    "status": "success"
                })
            );
        } else {
            println!("{} Unset {}", "✓".green(), key_str.bold());
        }
    } else if let Some(value_str) = value {
        let config_value = config_key.parse_value(&value_str)?;
        config.set(config_key, config_value.clone())?;
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "set",
                    "key": key_str,
                    "value": config_value,
                    "status": "success"
                })
            );
        } else {
            println!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan());
        }
    } else {
        let value = config.get_or_default(config_key);
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "key": key_str,
                    "value": value,
                    "default": config.get(config_key).is_none()
                })
            );
        } else {
            println!("{}", value);
        }
    }

    Ok(())
}

/// List all configuration values
fn list_configuration(config: &CleanerConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let config_map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&config_map)?);
    } else {
        for (key, value) in entries {
            println!("{}={}", key, value);
        }
    }

    Ok(())
}

fn print_usage(json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "error": "No configuration key specified",
                "usage": "gi-cleaner config <key> [value] or --list"
            })
        );
        return;
    }

    println!("{}", "Configuration Management".green().bold());
    println!();
    println!("{}", "Usage:".bold());
    println!("  {}  Get value", "gi-cleaner config <key>".cyan());
    println!("  {}  Set value", "gi-cleaner config <key> <value>".cyan());
    println!("  {}  List all", "gi-cleaner config --list".cyan());
    println!("  {}  Unset value", "gi-cleaner config --unset <key>".cyan());
    println!();
    println!("{}", "Keys:".bold());
    println!("  {}  Ignore file name (default .gitignore)", "scan.ignore_file".green());
    println!("  {}  Ask before deleting (default true)", "clean.confirm".green());
    println!(
        "  {}  Require an ignore file in the cleaned directory (default true)",
        "clean.require_root_ignore".green()
    );
}
