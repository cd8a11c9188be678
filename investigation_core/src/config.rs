//! Session configuration.
//!
//! Every delay here is cosmetic: changing it alters pacing, never which
//! transitions are allowed.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::viewer::RevealTiming;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed session configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Timings and seeds for one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long the splash screen stays up before the case files open.
    pub loading_delay_ms: u64,

    /// Pause between pressing "Next" and the next chapter unlocking.
    pub transition_delay_ms: u64,

    /// Typewriter reveal of chapter text.
    pub reveal: RevealTiming,

    /// Seed for sticky-note placement. `None` draws from entropy.
    pub note_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: 2000,
            transition_delay_ms: 600,
            reveal: RevealTiming::default(),
            note_seed: None,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }
}
