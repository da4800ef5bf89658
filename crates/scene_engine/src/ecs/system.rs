//! System trait and drivers
//!
//! A system declares the component kinds it needs and may implement either
//! or both per-entity hooks:
//!
//! - [`EntityLoader`]: runs once per matching entity after [`System::load`]
//! - [`EntityProcessor`]: runs once per matching entity every frame
//!
//! Hooks are discovered through [`System::as_loader`] and
//! [`System::as_processor`]; a system without a hook simply does nothing in
//! that phase. Matching entities are re-queried from the world on every
//! call, never cached on the system.
//!
//! If a hook fails, the pass stops there and the error is returned wrapped
//! in [`EcsError::System`] with the system and entity names attached.
//! Entities after the failing one are not visited that pass.

use super::{ComponentKind, EcsError, EntityKey, World};

/// State shared by every system
#[derive(Debug, Clone)]
pub struct SystemBase {
    name: &'static str,
    required: Vec<ComponentKind>,
    pauseable: bool,
}

impl SystemBase {
    /// Create a non-pauseable base requiring `required`
    pub fn new(name: &'static str, required: Vec<ComponentKind>) -> Self {
        Self {
            name,
            required,
            pauseable: false,
        }
    }

    /// Set whether the system stops while the world is paused
    pub fn pauseable(mut self, pauseable: bool) -> Self {
        self.pauseable = pauseable;
        self
    }
}

/// Per-entity load hook
pub trait EntityLoader {
    /// Prepare one matching entity
    fn load_entity(&mut self, world: &mut World, entity: EntityKey) -> Result<(), EcsError>;
}

/// Per-entity frame hook
pub trait EntityProcessor {
    /// Advance one matching entity by `delta_time` seconds
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        delta_time: f32,
    ) -> Result<(), EcsError>;
}

/// Behavior bound to one or more component kinds
pub trait System {
    /// Shared system state
    fn base(&self) -> &SystemBase;

    /// One-time initialization, run before any entity is loaded
    fn load(&mut self, world: &mut World) -> Result<(), EcsError>;

    /// Per-entity load hook, if this system has one
    fn as_loader(&mut self) -> Option<&mut dyn EntityLoader> {
        None
    }

    /// Per-entity frame hook, if this system has one
    fn as_processor(&mut self) -> Option<&mut dyn EntityProcessor> {
        None
    }

    /// Name used in logs and errors
    fn name(&self) -> &'static str {
        self.base().name
    }

    /// Kinds an entity must carry to be handled by this system
    fn required(&self) -> &[ComponentKind] {
        &self.base().required
    }

    /// Whether the system is skipped while the world is paused
    fn is_pauseable(&self) -> bool {
        self.base().pauseable
    }

    /// Run the load hook on every entity currently matching [`required`](Self::required)
    ///
    /// Each required component is flagged `loading` while the hook runs and
    /// `loaded` once it succeeds. A failed hook clears `loading` again.
    fn load_entities(&mut self, world: &mut World) -> Result<(), EcsError> {
        let name = self.name();
        let required = self.required().to_vec();
        let Some(loader) = self.as_loader() else {
            return Ok(());
        };

        for key in world.query(&required) {
            // An earlier hook in this pass may have removed the entity
            if !world.contains(key) {
                continue;
            }
            set_flags(world, key, &required, true, false);
            if let Err(err) = loader.load_entity(world, key) {
                set_flags(world, key, &required, false, false);
                return Err(hook_error(name, world, key, err));
            }
            set_flags(world, key, &required, false, true);
        }
        Ok(())
    }

    /// Run the frame hook on every entity currently matching [`required`](Self::required)
    fn update(&mut self, world: &mut World, delta_time: f32) -> Result<(), EcsError> {
        if self.is_pauseable() && world.is_paused() {
            log::trace!("{} skipped: world paused", self.name());
            return Ok(());
        }

        let name = self.name();
        let required = self.required().to_vec();
        let Some(processor) = self.as_processor() else {
            return Ok(());
        };

        for key in world.query(&required) {
            // An earlier hook in this pass may have removed the entity
            if !world.contains(key) {
                continue;
            }
            processor
                .process_entity(world, key, delta_time)
                .map_err(|err| hook_error(name, world, key, err))?;
        }
        Ok(())
    }
}

/// Systems the registry can construct for a kind
pub trait SystemType: System + Sized + 'static {
    /// Build the system for the given required kinds
    fn create(required: Vec<ComponentKind>) -> Self;
}

fn set_flags(world: &mut World, key: EntityKey, kinds: &[ComponentKind], loading: bool, loaded: bool) {
    if let Some(entity) = world.entity_mut(key) {
        for kind in kinds {
            if let Ok(component) = entity.get_component_mut(*kind) {
                component.loading = loading;
                component.loaded |= loaded;
            }
        }
    }
}

fn hook_error(system: &'static str, world: &World, key: EntityKey, err: EcsError) -> EcsError {
    let entity = world
        .entity(key)
        .map_or_else(|| format!("{key:?}"), |entity| entity.name().to_string());
    log::error!("{system} failed on '{entity}': {err}");
    EcsError::System {
        system,
        entity,
        source: Box::new(err),
    }
}
