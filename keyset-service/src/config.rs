//! Controller configuration

use keyset_core::{Error, Result, GENERIC_SUBSTRATE_PREFIX, MAX_SS58_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How overlapping key set refreshes are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOrdering {
    /// Drop completions older than the newest one already applied
    #[default]
    NewestRequestWins,
    /// Apply every completion in arrival order
    LastCompletedWins,
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Refresh completion ordering policy
    pub completion_ordering: CompletionOrdering,
    /// Clear the selection when leaving selection mode
    pub clear_selection_on_exit: bool,
    /// SS58 prefix used for the root key summary
    pub root_base58_prefix: u16,
    /// Show snackbars after derived key creation/deletion
    pub snackbar_messages: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            completion_ordering: CompletionOrdering::default(),
            clear_selection_on_exit: true,
            root_base58_prefix: GENERIC_SUBSTRATE_PREFIX,
            snackbar_messages: true,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), "Loaded controller configuration");
        Ok(config)
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<()> {
        if self.root_base58_prefix > MAX_SS58_PREFIX {
            return Err(Error::Config(format!(
                "root_base58_prefix {} exceeds {}",
                self.root_base58_prefix, MAX_SS58_PREFIX
            )));
        }
        Ok(())
    }
}
