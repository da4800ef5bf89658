//! Entity-Component-System implementation
//!
//! Entities are named containers holding at most one component per kind.
//! Systems are bound to component kinds and re-query the world on every
//! call, so entities gaining or losing components between frames are picked
//! up immediately. The [`World`] builds both from scene descriptions through
//! a [`KindResolver`].

pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod registry;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentData, ComponentKind, ComponentType};
pub use entity::{Entity, EntityKey};
pub use error::EcsError;
pub use registry::{ComponentRegistry, KindRegistration, KindResolver, ResolveError};
pub use system::{EntityLoader, EntityProcessor, System, SystemBase, SystemType};
pub use world::{SceneCode, World};
