//! ECS error types

use thiserror::Error;

use super::ComponentKind;
use crate::scene::SceneError;

/// Errors raised by entities, systems and the world
#[derive(Error, Debug)]
pub enum EcsError {
    /// The entity has no component of the requested kind
    #[error("Component '{kind}' not found on entity '{entity}'")]
    ComponentNotFound {
        /// Requested kind
        kind: ComponentKind,
        /// Entity name
        entity: String,
    },

    /// The stored component does not hold the requested payload type
    #[error("Component '{kind}' on entity '{entity}' is not a {expected}")]
    KindMismatch {
        /// Requested kind
        kind: ComponentKind,
        /// Entity name
        entity: String,
        /// Payload type the caller asked for
        expected: &'static str,
    },

    /// No entity is registered under this handle or name
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// A system hook failed while handling one entity
    #[error("System '{system}' failed on entity '{entity}': {source}")]
    System {
        /// System name
        system: &'static str,
        /// Entity being handled
        entity: String,
        /// Underlying failure
        #[source]
        source: Box<EcsError>,
    },

    /// Failure reported by a system hook
    #[error("{0}")]
    Hook(String),

    /// Scene loading failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}
