//! Built-in components
//!
//! Each payload is plain data decoded from a scene record; the matching
//! system in [`systems`](super::systems) holds the behavior.

pub mod camera;
pub mod lighting;
pub mod pause_toggle;
pub mod rotate;
pub mod transform;

pub use camera::CameraComponent;
pub use lighting::LightComponent;
pub use pause_toggle::PauseToggleComponent;
pub use rotate::RotateComponent;
pub use transform::TransformComponent;
