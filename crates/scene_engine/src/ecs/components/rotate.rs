//! Constant spin around an axis

use serde::{Deserialize, Serialize};

use crate::ecs::{ComponentKind, ComponentType};

/// Spins the entity around `axis` at `speed` radians per second
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateComponent {
    /// Rotation axis; a zero axis means no rotation
    pub axis: [f32; 3],
    /// Angular speed in radians per second
    pub speed: f32,
}

impl ComponentType for RotateComponent {
    const KIND: ComponentKind = ComponentKind::new("Rotate");
}

impl Default for RotateComponent {
    fn default() -> Self {
        Self {
            axis: [0.0, 1.0, 0.0],
            speed: 1.0,
        }
    }
}
