//! Interactive CLI prompts for user input

use crate::cleanup::Confirm;
use crate::core::error::{CleanerError, Result};
use dialoguer::theme::ColorfulTheme;
use std::io::{self, IsTerminal};

/// Asks on the terminal with a yes/no prompt
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        // Nobody can answer; treat as a refusal instead of blocking
        if !io::stdin().is_terminal() {
            return Ok(false);
        }

        dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| CleanerError::PromptFailed {
                reason: e.to_string(),
            })
    }
}
