//! Pause toggle binding

use serde::{Deserialize, Serialize};

use crate::ecs::{ComponentKind, ComponentType};
use crate::input::KeyCode;

/// Toggles the world pause flag when `key` is pressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseToggleComponent {
    /// Key bound to the toggle
    pub key: KeyCode,
}

impl ComponentType for PauseToggleComponent {
    const KIND: ComponentKind = ComponentKind::new("PauseToggle");
}

impl Default for PauseToggleComponent {
    fn default() -> Self {
        Self { key: KeyCode::P }
    }
}
