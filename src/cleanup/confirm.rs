//! Confirmation before deleting

use crate::core::error::Result;

/// Asks whether a destructive step may go ahead
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Accepts every prompt without asking (`--yes`, `clean.confirm = false`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}
