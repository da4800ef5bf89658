//! Camera component

use serde::{Deserialize, Serialize};

use crate::ecs::{ComponentKind, ComponentType};

/// Perspective camera attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraComponent {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Whether this camera becomes the active camera when loaded
    pub active: bool,
}

impl ComponentType for CameraComponent {
    const KIND: ComponentKind = ComponentKind::new("Camera");
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
            active: true,
        }
    }
}
