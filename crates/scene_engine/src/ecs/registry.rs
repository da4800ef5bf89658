//! Kind resolution
//!
//! Scene documents name component kinds by string. A [`KindResolver`] turns
//! such a name into a [`KindRegistration`]: the kind token plus factories for
//! its component and its system. [`ComponentRegistry`] is the static-table
//! resolver; any `Fn(&str) -> Result<KindRegistration, ResolveError>` works
//! as a resolver too.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::components::{
    CameraComponent, LightComponent, PauseToggleComponent, RotateComponent, TransformComponent,
};
use super::systems::{CameraSystem, LightingSystem, PauseSystem, RotateSystem, TransformSystem};
use super::{Component, ComponentKind, ComponentType, System, SystemType};

/// Builds a component from a scene input record
pub type ComponentFactory = fn(&Value) -> Component;

/// Builds the system for a kind, given the kinds it requires
pub type SystemFactory = fn(Vec<ComponentKind>) -> Box<dyn System>;

/// Everything needed to instantiate one component kind
#[derive(Clone, Copy)]
pub struct KindRegistration {
    /// Kind token
    pub kind: ComponentKind,
    /// Component constructor
    pub component: ComponentFactory,
    /// System constructor
    pub system: SystemFactory,
}

impl KindRegistration {
    /// Registration pairing payload `C` with system `S`
    pub fn of<C: ComponentType, S: SystemType>() -> Self {
        Self {
            kind: C::KIND,
            component: Component::from_record::<C>,
            system: boxed_system::<S>,
        }
    }

    /// Build a component from `record`
    pub fn create_component(&self, record: &Value) -> Component {
        (self.component)(record)
    }

    /// Build the system handling this kind
    pub fn create_system(&self) -> Box<dyn System> {
        (self.system)(vec![self.kind])
    }
}

fn boxed_system<S: SystemType>(required: Vec<ComponentKind>) -> Box<dyn System> {
    Box::new(S::create(required))
}

impl fmt::Debug for KindRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistration")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Kind resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No registration exists for this identifier
    #[error("Unknown component kind: {0}")]
    UnknownKind(String),
}

/// Maps kind identifiers to registrations
pub trait KindResolver {
    /// Resolve `kind` to its registration
    fn resolve(&self, kind: &str) -> Result<KindRegistration, ResolveError>;
}

impl<F> KindResolver for F
where
    F: Fn(&str) -> Result<KindRegistration, ResolveError>,
{
    fn resolve(&self, kind: &str) -> Result<KindRegistration, ResolveError> {
        self(kind)
    }
}

/// Static table of kind registrations
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    kinds: HashMap<&'static str, KindRegistration>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in kind
    pub fn with_builtins() -> Self {
        Self::new()
            .with::<TransformComponent, TransformSystem>()
            .with::<CameraComponent, CameraSystem>()
            .with::<LightComponent, LightingSystem>()
            .with::<RotateComponent, RotateSystem>()
            .with::<PauseToggleComponent, PauseSystem>()
    }

    /// Register payload `C` handled by system `S`, replacing any previous
    /// registration of the same kind
    pub fn register<C: ComponentType, S: SystemType>(&mut self) -> &mut Self {
        self.insert(KindRegistration::of::<C, S>())
    }

    /// Register payload `C` handled by system `S` (builder pattern)
    pub fn with<C: ComponentType, S: SystemType>(mut self) -> Self {
        self.register::<C, S>();
        self
    }

    /// Add a prebuilt registration
    pub fn insert(&mut self, registration: KindRegistration) -> &mut Self {
        let id = registration.kind.as_str();
        if self.kinds.insert(id, registration).is_some() {
            log::debug!("Replaced registration for kind '{id}'");
        }
        self
    }

    /// Whether `kind` is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Registered identifiers, sorted
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.kinds.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is registered
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl KindResolver for ComponentRegistry {
    fn resolve(&self, kind: &str) -> Result<KindRegistration, ResolveError> {
        self.kinds
            .get(kind)
            .copied()
            .ok_or_else(|| ResolveError::UnknownKind(kind.to_string()))
    }
}
