// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Visualizer configuration, loaded from an optional TOML file.

use resona_core::renderer::ColorMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{path}'")]
    Read {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar prefix.
    pub title: String,
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Resona".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Terrain and texture settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid resolution along both axes, also the terrain's extent in units.
    pub size: u32,
    /// Grayscale image seeding the heights. Missing files fall back to a
    /// flat terrain.
    pub heightmap: Option<PathBuf>,
    /// Texture bound to the terrain.
    pub colormap: Option<PathBuf>,
    /// Texture bound to the sphere.
    pub sphere_texture: Option<PathBuf>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 256,
            heightmap: Some(PathBuf::from("textures/terrain.ppm")),
            colormap: Some(PathBuf::from("textures/colormap.ppm")),
            sphere_texture: Some(PathBuf::from("textures/sun.ppm")),
        }
    }
}

/// Everything a session needs besides the audio file.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Terrain settings.
    pub terrain: TerrainConfig,
    /// Initial base color.
    pub color: ColorMode,
    /// Camera displacement per movement key.
    pub camera_speed: f32,
    /// Pause between frames, in milliseconds.
    pub frame_delay_ms: u64,
    /// Log a frame summary every this many frames; 0 disables it.
    pub report_every: u64,
    /// Skip audio output; the clock still runs.
    pub mute: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            terrain: TerrainConfig::default(),
            color: ColorMode::default(),
            camera_speed: 5.0,
            frame_delay_ms: 1,
            report_every: 60,
            mute: false,
        }
    }
}

impl VisualizerConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded configuration from '{}'", path.display());
        Ok(config)
    }

    /// Checks values that would make the session meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terrain.size == 0 {
            return Err(ConfigError::Invalid("terrain.size must be positive".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be positive",
                self.window.width, self.window.height
            )));
        }
        if !self.camera_speed.is_finite() {
            return Err(ConfigError::Invalid("camera_speed must be finite".into()));
        }
        Ok(())
    }

    /// The pause between frames.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
