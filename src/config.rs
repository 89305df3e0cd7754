//! Player-facing game settings.
//!
//! Edited from the title menu and persisted to `localStorage` as JSON, so
//! the next visit starts with the same difficulty, time limit and layout.
//! Unknown or missing fields fall back to defaults (`#[serde(default)]`).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// localStorage key.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "breaker_room_config";

/// Time limits offered by the menu, in minutes.
pub const TIME_LIMITS: [u32; 3] = [2, 4, 6];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Hints available for a whole game. `None` = unlimited.
    pub fn hint_budget(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(5),
            Difficulty::Hard => Some(0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Breaker-panel size: gates on the input side of the circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateLayout {
    Two,
    Four,
}

impl GateLayout {
    pub fn first_layer(self) -> usize {
        match self {
            GateLayout::Two => 2,
            GateLayout::Four => 4,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GateLayout::Two => GateLayout::Four,
            GateLayout::Four => GateLayout::Two,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    pub time_limit_minutes: u32,
    pub layout: GateLayout,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            time_limit_minutes: 4,
            layout: GateLayout::Four,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TIME_LIMITS.contains(&self.time_limit_minutes) {
            return Err(ConfigError::TimeLimit(self.time_limit_minutes));
        }
        Ok(())
    }

    /// Step to the next offered time limit, wrapping around.
    pub fn cycle_time_limit(&mut self) {
        let idx = TIME_LIMITS
            .iter()
            .position(|m| *m == self.time_limit_minutes)
            .map(|i| (i + 1) % TIME_LIMITS.len())
            .unwrap_or(0);
        self.time_limit_minutes = TIME_LIMITS[idx];
    }
}

/// Browser localStorage, when available.
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load the saved config. Broken data is discarded and defaults are used.
#[cfg(target_arch = "wasm32")]
pub fn load() -> Config {
    let Some(storage) = get_storage() else {
        return Config::default();
    };
    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return Config::default(),
    };
    match Config::from_json(&json) {
        Ok(config) => {
            tracing::info!(?config, "config loaded");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "discarding stored config");
            let _ = storage.remove_item(STORAGE_KEY);
            Config::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> Config {
    Config::default()
}

/// Persist the config. Failures are logged and otherwise ignored.
#[cfg(target_arch = "wasm32")]
pub fn save(config: &Config) {
    let json = match config.to_json() {
        Ok(j) => j,
        Err(e) => {
            tracing::warn!(error = %e, "config serialization failed");
            return;
        }
    };
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            tracing::warn!("localStorage write failed: {:?}", e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_config: &Config) {}
