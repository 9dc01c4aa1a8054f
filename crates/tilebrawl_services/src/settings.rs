//! Settings management
//!
//! Every section has defaults, so a settings file only needs the values it
//! changes.

use crate::input::ScriptedEvent;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tilebrawl_core::components::{Camera, Movement, Sprite};
use tilebrawl_core::time::TARGET_FPS;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub simulation: SimulationSettings,
    pub assets: AssetSettings,
    pub spawns: SpawnSettings,
    /// Input replayed by headless hosts.
    pub input_script: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub zoom: i32,
    pub world_width: i32,
    pub world_height: i32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom: 1,
            world_width: 1600,
            world_height: 1200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub target_fps: u32,
    /// Frames a headless run executes before exiting.
    pub frames: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            frames: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Sprite sheets, indexed by `Sprite::sheet_index`.
    pub sprite_sheets: Vec<PathBuf>,
    pub tile_atlas: PathBuf,
    pub tile_map: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            sprite_sheets: vec![
                PathBuf::from("assets/bulletA.png"),
                PathBuf::from("assets/brock.png"),
            ],
            tile_atlas: PathBuf::from("assets/tiles.png"),
            tile_map: PathBuf::from("assets/map.png"),
        }
    }
}

impl AssetSettings {
    /// Resolve relative asset paths against `root`.
    pub fn rooted_at(&self, root: &Path) -> Self {
        Self {
            sprite_sheets: self.sprite_sheets.iter().map(|p| root.join(p)).collect(),
            tile_atlas: root.join(&self.tile_atlas),
            tile_map: root.join(&self.tile_map),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSettings {
    pub sheet_index: usize,
    pub frames: i32,
    pub duration_seconds: f32,
    pub frame_x: i32,
    pub frame_y: i32,
    pub size: i32,
}

impl SpriteSettings {
    pub fn to_sprite(&self) -> Sprite {
        Sprite::new(
            self.sheet_index,
            self.frames,
            self.duration_seconds,
            self.frame_x,
            self.frame_y,
            self.size,
        )
    }
}

/// Where and how a character enters the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    pub sprite: SpriteSettings,
}

impl SpawnPoint {
    pub fn movement(&self) -> Movement {
        Movement::new(self.vx, self.vy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    pub player: SpawnPoint,
    pub enemy: SpawnPoint,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            player: SpawnPoint {
                x: 200,
                y: 250,
                vx: 0,
                vy: 0,
                sprite: SpriteSettings {
                    sheet_index: 0,
                    frames: 2,
                    duration_seconds: 15.0,
                    frame_x: 0,
                    frame_y: 0,
                    size: 50,
                },
            },
            enemy: SpawnPoint {
                x: 1100,
                y: 650,
                vx: 200,
                vy: 0,
                sprite: SpriteSettings {
                    sheet_index: 1,
                    frames: 2,
                    duration_seconds: 25.0,
                    frame_x: 0,
                    frame_y: 0,
                    size: 55,
                },
            },
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Camera component described by the window and camera sections.
    pub fn camera_component(&self) -> Camera {
        Camera::new(
            self.camera.zoom,
            self.window.width,
            self.window.height,
            self.camera.world_width,
            self.camera.world_height,
        )
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.camera.zoom < 1 {
            return Err(SettingsError::Invalid(format!(
                "camera zoom must be at least 1, got {}",
                self.camera.zoom
            )));
        }
        if self.window.width > self.camera.world_width
            || self.window.height > self.camera.world_height
        {
            return Err(SettingsError::Invalid(format!(
                "viewport {}x{} exceeds world {}x{}",
                self.window.width,
                self.window.height,
                self.camera.world_width,
                self.camera.world_height
            )));
        }
        if self.simulation.target_fps == 0 {
            return Err(SettingsError::Invalid("target fps must be positive".into()));
        }
        for (role, spawn) in [("player", &self.spawns.player), ("enemy", &self.spawns.enemy)] {
            if spawn.sprite.frames < 1 || spawn.sprite.size < 1 {
                return Err(SettingsError::Invalid(format!(
                    "{role} sprite needs at least one frame and a positive size"
                )));
            }
            if spawn.sprite.sheet_index >= self.assets.sprite_sheets.len() {
                return Err(SettingsError::Invalid(format!(
                    "{role} sprite sheet {} is not configured",
                    spawn.sprite.sheet_index
                )));
            }
        }
        Ok(())
    }
}
