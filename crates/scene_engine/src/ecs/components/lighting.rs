//! Light component

use serde::{Deserialize, Serialize};

use crate::ecs::{ComponentKind, ComponentType};
use crate::scene::LightKind;

/// Light attached to an entity
///
/// Position comes from the entity transform; `direction` is in the
/// entity's local space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightComponent {
    /// Light category
    #[serde(rename = "type")]
    pub kind: LightKind,
    /// Linear RGB color
    pub color: [f32; 3],
    /// Intensity multiplier
    pub intensity: f32,
    /// Local-space direction (directional lights)
    pub direction: [f32; 3],
}

impl ComponentType for LightComponent {
    const KIND: ComponentKind = ComponentKind::new("Light");
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            color: [1.0; 3],
            intensity: 1.0,
            direction: [0.0, -1.0, 0.0],
        }
    }
}
