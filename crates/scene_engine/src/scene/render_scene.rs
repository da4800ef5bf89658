//! Render context shared by all systems
//!
//! `RenderScene` stands in for the rendering backend's scene object. Systems
//! never draw anything themselves; they register the active camera, add or
//! update lights and sync node transforms here, and the backend reads this
//! state when it renders a frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Transform, Vec3};

/// Light categories understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    /// Uniform light from all directions
    Ambient,
    /// Parallel rays along a direction
    #[default]
    Directional,
    /// Omnidirectional light from a position
    Point,
}

/// Active camera parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Entity the camera belongs to
    pub entity: String,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Width / height
    pub aspect: f32,
    /// World-space camera transform
    pub transform: Transform,
}

/// A light registered by an entity
#[derive(Debug, Clone, PartialEq)]
pub struct LightState {
    /// Light category
    pub kind: LightKind,
    /// Linear RGB color
    pub color: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// World-space position (point lights)
    pub position: Vec3,
    /// World-space direction (directional lights)
    pub direction: Vec3,
    /// Whether the light contributes to the frame
    pub enabled: bool,
}

/// Render-side state of one entity node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    /// World transform
    pub transform: Transform,
    /// Whether the node is drawn
    pub visible: bool,
}

/// Render context owned by the world
#[derive(Debug, Clone)]
pub struct RenderScene {
    surface: Option<(u32, u32)>,
    /// Background color
    pub clear_color: [f32; 3],
    camera: Option<CameraState>,
    lights: BTreeMap<String, LightState>,
    nodes: BTreeMap<String, NodeState>,
}

impl RenderScene {
    /// Create a scene with no surface attached
    pub fn new() -> Self {
        Self {
            surface: None,
            clear_color: [0.0, 0.0, 0.0],
            camera: None,
            lights: BTreeMap::new(),
            nodes: BTreeMap::new(),
        }
    }

    /// Attach a render surface; the scene is ready once one is attached
    pub fn attach_surface(&mut self, width: u32, height: u32) {
        log::debug!("Render surface attached ({width}x{height})");
        self.surface = Some((width, height));
        let aspect = self.aspect_ratio();
        if let Some(camera) = self.camera.as_mut() {
            camera.aspect = aspect;
        }
    }

    /// Detach the render surface (e.g. window minimized or lost)
    pub fn detach_surface(&mut self) {
        self.surface = None;
    }

    /// Whether a surface is attached and frames can be produced
    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    /// Attached surface size, if any
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface
    }

    /// Surface aspect ratio, 1.0 without a surface
    pub fn aspect_ratio(&self) -> f32 {
        match self.surface {
            Some((width, height)) if height > 0 => width as f32 / height as f32,
            _ => 1.0,
        }
    }

    /// Make `camera` the active camera
    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = Some(camera);
    }

    /// Active camera
    pub fn camera(&self) -> Option<&CameraState> {
        self.camera.as_ref()
    }

    /// Active camera, mutable
    pub fn camera_mut(&mut self) -> Option<&mut CameraState> {
        self.camera.as_mut()
    }

    /// Add or replace the light owned by `entity`
    pub fn upsert_light(&mut self, entity: &str, light: LightState) {
        self.lights.insert(entity.to_string(), light);
    }

    /// Light owned by `entity`
    pub fn light(&self, entity: &str) -> Option<&LightState> {
        self.lights.get(entity)
    }

    /// Light owned by `entity`, mutable
    pub fn light_mut(&mut self, entity: &str) -> Option<&mut LightState> {
        self.lights.get_mut(entity)
    }

    /// All lights keyed by owning entity
    pub fn lights(&self) -> impl Iterator<Item = (&str, &LightState)> {
        self.lights.iter().map(|(name, light)| (name.as_str(), light))
    }

    /// Write the node state for `entity`
    pub fn sync_node(&mut self, entity: &str, node: NodeState) {
        self.nodes.insert(entity.to_string(), node);
    }

    /// Node state for `entity`
    pub fn node(&self, entity: &str) -> Option<&NodeState> {
        self.nodes.get(entity)
    }

    /// Number of synced nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Forget everything an entity registered
    pub fn remove_entity(&mut self, entity: &str) {
        self.lights.remove(entity);
        self.nodes.remove(entity);
        if self.camera.as_ref().is_some_and(|camera| camera.entity == entity) {
            self.camera = None;
        }
    }

    /// Drop all scene content, keeping the surface
    pub fn clear(&mut self) {
        self.camera = None;
        self.lights.clear();
        self.nodes.clear();
    }
}

impl Default for RenderScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera(entity: &str) -> CameraState {
        CameraState {
            entity: entity.to_string(),
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            aspect: 1.0,
            transform: Transform::identity(),
        }
    }

    #[test]
    fn test_ready_tracks_surface() {
        let mut scene = RenderScene::new();
        assert!(!scene.is_ready());

        scene.attach_surface(800, 600);
        assert!(scene.is_ready());
        assert_relative_eq!(scene.aspect_ratio(), 800.0 / 600.0);

        scene.detach_surface();
        assert!(!scene.is_ready());
    }

    #[test]
    fn test_attach_updates_camera_aspect() {
        let mut scene = RenderScene::new();
        scene.set_camera(camera("Camera"));
        scene.attach_surface(1920, 1080);

        assert_relative_eq!(scene.camera().unwrap().aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn test_remove_entity_drops_its_camera_and_nodes() {
        let mut scene = RenderScene::new();
        scene.set_camera(camera("Camera"));
        scene.sync_node(
            "Camera",
            NodeState {
                transform: Transform::identity(),
                visible: true,
            },
        );

        scene.remove_entity("Camera");
        assert!(scene.camera().is_none());
        assert_eq!(scene.node_count(), 0);
    }
}
