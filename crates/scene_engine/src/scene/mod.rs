//! Scene descriptions and where they come from
//!
//! A scene description is a JSON document:
//!
//! ```json
//! {
//!   "entities": {
//!     "Player": { "components": { "Transform": { "position": [0, 1, 0] } } }
//!   },
//!   "worldEntity": "Player"
//! }
//! ```
//!
//! Documents are addressed by a collection and a scene identifier and
//! fetched through a [`SceneSource`].

pub mod description;
pub mod render_scene;
pub mod source;

pub use description::{EntityDescription, SceneDescription};
pub use render_scene::{CameraState, LightKind, LightState, NodeState, RenderScene};
pub use source::{FileSceneSource, MemorySceneSource, SceneSource};

use thiserror::Error;

/// Scene loading errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// The fetched payload was empty or `null`
    #[error("Scene '{0}' has no usable payload")]
    Format(String),

    /// The payload is missing its `entities` table
    #[error("Scene '{0}' does not define an `entities` table")]
    Schema(String),

    /// The source has no document for this collection and scene
    #[error("Scene '{scene}' not found in collection '{collection}'")]
    NotFound {
        /// Collection identifier
        collection: String,
        /// Scene identifier
        scene: String,
    },

    /// IO error while reading a scene
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Label used in logs and errors for a collection/scene pair
pub fn scene_label(collection: &str, scene: &str) -> String {
    format!("{collection}/{scene}")
}
