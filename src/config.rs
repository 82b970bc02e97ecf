//! Tunables for a game, and the settings file the terminal driver reads.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rules that the classic game hard-codes but that tests and variants like
/// to bend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lamp fuel for players who skip the instructions.
    pub lamp_turns: i32,
    /// Lamp fuel for players who read the instructions.
    pub lamp_turns_with_instructions: i32,
    /// Fuel level at which the player is warned and batteries kick in.
    pub low_fuel_threshold: i32,
    pub battery_charge: i32,
    pub inventory_limit: usize,
    pub max_deaths: u32,
    /// Every this many visits a room gets its long description again.
    pub full_description_period: u32,
    /// How many times "look" complains before it gives up complaining.
    pub look_complaints: u32,
    /// Fixed seed for reproducible games; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lamp_turns: 330,
            lamp_turns_with_instructions: 1000,
            low_fuel_threshold: 30,
            battery_charge: 2500,
            inventory_limit: 7,
            max_deaths: 3,
            full_description_period: 5,
            look_complaints: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_lamp_turns(mut self, turns: i32) -> Self {
        self.lamp_turns = turns;
        self
    }

    /// At least one slot, or nothing could ever be picked up.
    pub fn with_inventory_limit(mut self, limit: usize) -> Self {
        self.inventory_limit = limit.max(1);
        self
    }
}

/// Settings for the terminal driver, read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The `advent.dat` file to compile.
    pub data_path: PathBuf,
    /// Where `save <name>` writes its snapshots.
    pub save_dir: PathBuf,
    /// Characters per second when printing; 0 prints at full speed.
    pub baud: u32,
    pub game: GameConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("advent.dat"),
            save_dir: PathBuf::from("."),
            baud: 0,
            game: GameConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
