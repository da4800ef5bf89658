//! Transform component
//!
//! Scene files give position and scale as `[x, y, z]` and rotation as XYZ
//! euler angles in degrees.

use serde::{Deserialize, Serialize};

use crate::ecs::{ComponentKind, ComponentType};
use crate::foundation::math::{utils, Transform};

/// Initial placement of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformComponent {
    /// Position in world units
    pub position: [f32; 3],
    /// XYZ euler angles in degrees
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
}

impl ComponentType for TransformComponent {
    const KIND: ComponentKind = ComponentKind::new("Transform");
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl TransformComponent {
    /// Create from position only
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a math transform
    pub fn to_transform(&self) -> Transform {
        let euler = utils::vec3(self.rotation).map(utils::deg_to_rad);
        Transform::from_euler(utils::vec3(self.position), euler, utils::vec3(self.scale))
    }
}
