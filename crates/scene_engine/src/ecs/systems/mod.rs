//! Built-in systems, one per built-in component kind

pub mod camera;
pub mod lighting;
pub mod pause;
pub mod rotate;
pub mod transform;

pub use camera::CameraSystem;
pub use lighting::LightingSystem;
pub use pause::PauseSystem;
pub use rotate::RotateSystem;
pub use transform::TransformSystem;
