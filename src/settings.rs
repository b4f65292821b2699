//! Game settings and tunables
//!
//! Read from a JSON file next to the binary. Missing keys fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "DUNGEON_DASH_SETTINGS";
/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "dungeon-dash.json";

/// Tunables that stay fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum time between two player steps (ms)
    pub move_delay_ms: u64,
    /// Front-end wake-up period (ms)
    pub tick_ms: u64,
    /// RNG seed; random when absent
    pub seed: Option<u64>,

    // === Board ===
    /// Board width before the first viewport event
    pub board_width: i32,
    /// Board height before the first viewport event
    pub board_height: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_delay_ms: DEFAULT_MOVE_DELAY.as_millis() as u64,
            tick_ms: DEFAULT_TICK.as_millis() as u64,
            seed: None,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

impl Settings {
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Tick period, never zero so the front-end cannot spin
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Settings file path: `$DUNGEON_DASH_SETTINGS` or `./dungeon-dash.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
