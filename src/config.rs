// ── GameConfig ────────────────────────────────────────────────────────────────
//
// Tunables for the whole game, read from an optional JSON file.  Every field
// has a default, so an empty object (or no file at all) reproduces the stock
// game, and a partial file only overrides what it names:
//
// ```json
// { "physics": { "gravity": 0.8 }, "camera": { "panning_fraction": 0.2 } }
// ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::tilemap::LayerOptions;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowSettings,
    pub physics: PhysicsSettings,
    pub player: PlayerSettings,
    pub map: MapSettings,
    pub camera: CameraSettings,
    pub audio: AudioSettings,
}

impl GameConfig {
    /// Load from `path`.  A missing file yields the defaults; an unreadable
    /// or malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
        };
        let config = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Edge of one map cell in world pixels after scaling.
    pub fn grid_pixel_size(&self) -> f32 {
        self.map.sprite_pixel_size as f32 * self.map.tile_scaling
    }
}

/// Default clear color.
pub const BLIZZARD_BLUE: [u8; 3] = [172, 229, 238];

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Clear color as 8-bit RGB.
    pub background: [u8; 3],
    /// Fixed update rate; speeds and gravity are per update.
    pub updates_per_second: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Game Platformer Example".into(),
            background: BLIZZARD_BLUE,
            updates_per_second: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Horizontal speed while Left/Right is held, px per update.
    pub movement_speed: f32,
    /// Initial upward velocity of a jump, px per update.
    pub jump_speed: f32,
    /// Downward acceleration, px per update².
    pub gravity: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self { movement_speed: 5.0, jump_speed: 20.0, gravity: 1.1 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub sprite: PathBuf,
    pub scaling: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            sprite: PathBuf::from("assets/sprites/ninja_frog.png"),
            scaling: 1.5,
            start_x: 196.0,
            start_y: 270.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub path: PathBuf,
    pub tile_scaling: f32,
    /// Pixel edge of one tile in the source art.
    pub sprite_pixel_size: u32,
    /// Per-layer load options, keyed by Tiled layer name.
    pub layers: HashMap<String, LayerOptions>,
}

impl Default for MapSettings {
    fn default() -> Self {
        let hashed = LayerOptions { use_spatial_hash: true };
        let layers = HashMap::from([
            ("Walls".to_string(), hashed),
            ("Coins".to_string(), hashed),
            ("End".to_string(), hashed),
            ("Background".to_string(), LayerOptions { use_spatial_hash: false }),
        ]);
        Self {
            path: PathBuf::from("assets/map/project_map.tmj"),
            tile_scaling: 1.0,
            sprite_pixel_size: 32,
            layers,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Fraction of the remaining distance the camera covers each frame.
    pub panning_fraction: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { panning_fraction: 0.12 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub coin_sound: Option<PathBuf>,
    pub jump_sound: Option<PathBuf>,
}
