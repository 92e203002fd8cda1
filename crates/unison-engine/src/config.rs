use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What to do when a player registers after phrase events have arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateRegistration {
    /// Count the player toward every phrase it plays, with a warning.
    /// Phrases already in progress may then never reach their quorum.
    #[default]
    Count,
    /// Refuse the registration.
    Reject,
}

/// What to do when a player id is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePlayers {
    /// Replace the engine for that id and append the roster entry again.
    #[default]
    Replace,
    /// Refuse the registration.
    Reject,
}

/// Unison coordination settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UnisonConfig {
    pub late_registration: LateRegistration,
    pub duplicate_players: DuplicatePlayers,
    /// Log every unison phrase when the coordinator is built.
    pub log_phrases_on_load: bool,
}

impl Default for UnisonConfig {
    fn default() -> Self {
        Self {
            late_registration: LateRegistration::Count,
            duplicate_players: DuplicatePlayers::Replace,
            log_phrases_on_load: true,
        }
    }
}

impl UnisonConfig {
    /// Settings that refuse every registration the coordinator cannot count
    /// correctly.
    pub fn strict() -> Self {
        Self {
            late_registration: LateRegistration::Reject,
            duplicate_players: DuplicatePlayers::Reject,
            ..Self::default()
        }
    }

    /// Loads config from a JSON file.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read unison config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse unison config {}", path.display()))?;
        Ok(config)
    }

    /// Saves config to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
