//! Application errors

use scene_engine::config::ConfigError;
use scene_engine::ecs::EcsError;
use scene_engine::scene::SceneError;
use thiserror::Error;

/// Errors surfaced by `scene_app` commands
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The world failed to load or update a scene
    #[error("World error: {0}")]
    World(#[from] EcsError),

    /// A scene document could not be read or validated
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Stub generation failed
    #[error("Generator error: {0}")]
    Generator(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
