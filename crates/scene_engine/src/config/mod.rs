//! Configuration system
//!
//! Configuration files are TOML or RON, picked by extension. [`WorldConfig`]
//! covers everything a world needs to locate and run scenes.

pub use serde::{Deserialize, Serialize};

use crate::input::KeyCode;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # World Configuration
///
/// Where scene files live, which scene to start with, and how the frame
/// loop is driven.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Directory holding `<collection>/<scene>.json` files
    pub scene_root: String,
    /// Collection loaded when none is given
    pub default_collection: String,
    /// Scene loaded when none is given
    pub default_scene: String,
    /// Start the world paused
    pub start_paused: bool,
    /// Seconds per frame for fixed-step runs
    pub fixed_delta: f32,
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Key the runner presses when the scene binds no `PauseToggle`
    pub pause_key: KeyCode,
    /// Render surface width in pixels
    pub surface_width: u32,
    /// Render surface height in pixels
    pub surface_height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            scene_root: "scenes".to_string(),
            default_collection: "main".to_string(),
            default_scene: "index".to_string(),
            start_paused: false,
            fixed_delta: 1.0 / 60.0,
            log_level: "info".to_string(),
            pause_key: KeyCode::P,
            surface_width: 1280,
            surface_height: 720,
        }
    }
}

impl Config for WorldConfig {}

impl WorldConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scene_root.is_empty() {
            return Err(ConfigError::Invalid("scene_root cannot be empty".to_string()));
        }
        if self.default_collection.is_empty() || self.default_scene.is_empty() {
            return Err(ConfigError::Invalid(
                "default collection and scene must be named".to_string(),
            ));
        }
        if !(self.fixed_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_delta must be positive, got {}",
                self.fixed_delta
            )));
        }
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(ConfigError::Invalid("surface size must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Surface aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.surface_width as f32 / self.surface_height as f32
    }
}
