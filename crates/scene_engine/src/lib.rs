//! # Scene Engine
//!
//! A small Entity-Component-System layer that builds running worlds from
//! declarative JSON scene descriptions.
//!
//! ## Features
//!
//! - **Name-keyed entities**: entities are looked up by name and filtered by
//!   the component kinds they carry
//! - **Kind registry**: scene data refers to component kinds by string; a
//!   [`ComponentRegistry`](ecs::ComponentRegistry) maps each kind to its
//!   component and system factories
//! - **One system per kind**: every kind referenced by a scene gets exactly
//!   one system driving its load and per-frame update hooks
//! - **Render context**: systems push camera, light and node state into a
//!   [`RenderScene`](scene::RenderScene) owned by the world
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WorldConfig::default();
//!     let mut world = World::from_config(&config, ComponentRegistry::with_builtins());
//!     world.render_scene_mut().attach_surface(1280, 720);
//!
//!     world.load_scene_data(&config.default_scene, &config.default_collection)?;
//!     world.load_systems()?;
//!
//!     for _ in 0..60 {
//!         world.update_systems(config.fixed_delta)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, WorldConfig},
        ecs::{
            Component, ComponentKind, ComponentRegistry, ComponentType, EcsError, Entity,
            EntityKey, EntityLoader, EntityProcessor, KindResolver, System, SystemBase,
            SystemType, World,
        },
        foundation::math::{Quat, Transform, Vec3},
        input::{InputEvent, KeyCode},
        scene::{FileSceneSource, MemorySceneSource, RenderScene, SceneError, SceneSource},
    };
}
