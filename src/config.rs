/// Runtime-tunable settings, loaded from an optional JSON file.
///
/// Every field has a default taken from [`crate::constants`]; a config file
/// only needs to name what it overrides.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::constants;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "DUNGEON_ARCHER_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub scroll_thresh: f32,
    pub fps: u32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub arrow_speed: f32,
    pub fireball_speed: f32,
    pub enemy_range_to_player: f32,
    pub attack_range: f32,
    pub boss_fireball_range: f32,
    /// First level index played after the menu.
    pub start_level: u32,
    /// Directory holding `level{N}_data.csv` files.
    pub levels_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: constants::SCREEN_WIDTH,
            screen_height: constants::SCREEN_HEIGHT,
            scroll_thresh: constants::SCROLL_THRESH,
            fps: constants::FPS,
            player_speed: constants::SPEED,
            enemy_speed: constants::ENEMY_SPEED,
            arrow_speed: constants::ARROW_SPEED,
            fireball_speed: constants::FIREBALL_SPEED,
            enemy_range_to_player: constants::ENEMY_RANGE_TO_PLAYER,
            attack_range: constants::ATTACK_RANGE,
            boss_fireball_range: constants::BOSS_FIREBALL_RANGE,
            start_level: 1,
            levels_dir: PathBuf::from("levels"),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|source| ConfigError::Json {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, path)
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], or falls back to defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
