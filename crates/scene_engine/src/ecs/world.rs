//! ECS World implementation
//!
//! The world owns every entity, the render context, the pause flag and the
//! systems built for the current scene. Entities are stored in a slotmap and
//! addressed by name; registry order is the order names were first
//! registered.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use slotmap::SlotMap;

use super::{ComponentKind, EcsError, Entity, EntityKey, KindRegistration, KindResolver, System};
use crate::config::WorldConfig;
use crate::foundation::time::Stopwatch;
use crate::input::{InputEvent, InputQueue};
use crate::scene::{scene_label, FileSceneSource, RenderScene, SceneDescription, SceneSource};

/// Runtime bundle derived from a scene description
pub struct SceneCode {
    label: String,
    kinds: Vec<ComponentKind>,
    systems: Vec<Box<dyn System>>,
}

impl SceneCode {
    /// `collection/scene` the bundle was built from
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Kinds with at least one component instantiated, in first-use order
    pub fn kinds(&self) -> &[ComponentKind] {
        &self.kinds
    }

    /// Number of systems in the bundle
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// System names in run order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }
}

impl fmt::Debug for SceneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneCode")
            .field("label", &self.label)
            .field("kinds", &self.kinds)
            .field("systems", &self.system_names())
            .finish()
    }
}

/// ECS World containing all entities and the active scene
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    names: HashMap<String, EntityKey>,
    order: Vec<EntityKey>,
    render_scene: RenderScene,
    paused: bool,
    input: InputQueue,
    resolver: Box<dyn KindResolver>,
    source: Box<dyn SceneSource>,
    /// Resolutions keyed by the identifier the scene used
    cache: Vec<(String, KindRegistration)>,
    scene_data: Option<Value>,
    scene_code: Option<SceneCode>,
    world_entity: Option<String>,
    generation: u64,
}

impl World {
    /// Create an empty world
    ///
    /// No render surface is attached, so [`update_systems`](Self::update_systems)
    /// does nothing until one is.
    pub fn new(resolver: impl KindResolver + 'static, source: impl SceneSource + 'static) -> Self {
        Self {
            entities: SlotMap::with_key(),
            names: HashMap::new(),
            order: Vec::new(),
            render_scene: RenderScene::new(),
            paused: false,
            input: InputQueue::new(),
            resolver: Box::new(resolver),
            source: Box::new(source),
            cache: Vec::new(),
            scene_data: None,
            scene_code: None,
            world_entity: None,
            generation: 0,
        }
    }

    /// Create a world reading scenes from `config.scene_root`, with the
    /// configured surface attached
    pub fn from_config(config: &WorldConfig, resolver: impl KindResolver + 'static) -> Self {
        let mut world = Self::new(resolver, FileSceneSource::new(&config.scene_root));
        world.paused = config.start_paused;
        world
            .render_scene
            .attach_surface(config.surface_width, config.surface_height);
        world
    }

    // Entity registry

    /// Register a new entity with no components
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityKey {
        self.insert_entity(Entity::new(name))
    }

    /// Register `entity` under its name
    ///
    /// An entity already registered under the same name is replaced (not
    /// merged); the new entity takes over its registry position.
    pub fn insert_entity(&mut self, mut entity: Entity) -> EntityKey {
        let name = entity.name().to_string();
        let key = self.entities.insert_with_key(|key| {
            entity.attach(key);
            entity
        });

        match self.names.insert(name.clone(), key) {
            Some(previous) => {
                log::debug!("Replacing entity '{name}'");
                self.entities.remove(previous);
                if let Some(slot) = self.order.iter_mut().find(|slot| **slot == previous) {
                    *slot = key;
                }
            }
            None => {
                log::debug!("Created entity '{name}'");
                self.order.push(key);
            }
        }
        key
    }

    /// Remove the entity registered as `name`, returning it
    ///
    /// Unknown names are ignored. Whatever the entity registered in the
    /// render scene is dropped with it.
    pub fn remove_entity(&mut self, name: &str) -> Option<Entity> {
        let key = self.names.remove(name)?;
        self.order.retain(|slot| *slot != key);
        self.render_scene.remove_entity(name);
        log::debug!("Removed entity '{name}'");
        self.entities.remove(key)
    }

    /// Whether `key` still refers to a registered entity
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Entity for `key`
    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Entity for `key`, mutable
    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Entity for `key`, or [`EcsError::EntityNotFound`]
    pub fn try_entity(&self, key: EntityKey) -> Result<&Entity, EcsError> {
        self.entities
            .get(key)
            .ok_or_else(|| EcsError::EntityNotFound(format!("{key:?}")))
    }

    /// Entity for `key`, mutable, or [`EcsError::EntityNotFound`]
    pub fn try_entity_mut(&mut self, key: EntityKey) -> Result<&mut Entity, EcsError> {
        self.entities
            .get_mut(key)
            .ok_or_else(|| EcsError::EntityNotFound(format!("{key:?}")))
    }

    /// Entity registered as `name`
    pub fn search(&self, name: &str) -> Option<&Entity> {
        self.search_key(name).and_then(|key| self.entities.get(key))
    }

    /// Entity registered as `name`, mutable
    pub fn search_mut(&mut self, name: &str) -> Option<&mut Entity> {
        let key = self.search_key(name)?;
        self.entities.get_mut(key)
    }

    /// Handle of the entity registered as `name`
    pub fn search_key(&self, name: &str) -> Option<EntityKey> {
        self.names.get(name).copied()
    }

    /// Entities for `names`, in the given order; unknown names are dropped
    pub fn search_many(&self, names: &[&str]) -> Vec<&Entity> {
        names.iter().filter_map(|name| self.search(name)).collect()
    }

    /// Registered entities in registry order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|key| self.entities.get(*key))
    }

    /// Number of registered entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Handles of entities holding every kind in `kinds`, in registry order
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<EntityKey> {
        self.order
            .iter()
            .copied()
            .filter(|key| self.entities.get(*key).is_some_and(|e| e.has_all(kinds)))
            .collect()
    }

    /// Entities holding every kind in `kinds`, in registry order
    pub fn entities_with(&self, kinds: &[ComponentKind]) -> Vec<&Entity> {
        self.entities().filter(|entity| entity.has_all(kinds)).collect()
    }

    // World state

    /// Whether pauseable systems are currently skipped
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume pauseable systems
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("World {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    /// Flip the pause flag, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    /// Input events queued for the next update
    pub fn input(&self) -> &InputQueue {
        &self.input
    }

    /// Queue an input event for the next update
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Render context
    pub fn render_scene(&self) -> &RenderScene {
        &self.render_scene
    }

    /// Render context, mutable
    pub fn render_scene_mut(&mut self) -> &mut RenderScene {
        &mut self.render_scene
    }

    /// Entity named by the scene's `worldEntity`, if declared and present
    pub fn world_entity(&self) -> Option<&Entity> {
        self.world_entity.as_deref().and_then(|name| self.search(name))
    }

    /// Raw payload of the last scene loaded through [`load_scene_data`](Self::load_scene_data)
    pub fn scene_data(&self) -> Option<&Value> {
        self.scene_data.as_ref()
    }

    /// Current scene bundle
    pub fn scene_code(&self) -> Option<&SceneCode> {
        self.scene_code.as_ref()
    }

    /// Every kind resolved so far, in resolution order
    pub fn resolved_kinds(&self) -> Vec<ComponentKind> {
        let mut kinds: Vec<ComponentKind> = Vec::new();
        for (_, registration) in &self.cache {
            if !kinds.contains(&registration.kind) {
                kinds.push(registration.kind);
            }
        }
        kinds
    }

    // Scene lifecycle

    /// Fetch `scene` from `collection` and build its bundle
    ///
    /// Fails with [`SceneError::Format`](crate::scene::SceneError::Format)
    /// for a falsy payload and
    /// [`SceneError::Schema`](crate::scene::SceneError::Schema) for one
    /// without `entities`; nothing is created in either case.
    pub fn load_scene_data(&mut self, scene: &str, collection: &str) -> Result<(), EcsError> {
        let label = scene_label(collection, scene);
        let stopwatch = Stopwatch::start_new();

        let payload = self.source.fetch(collection, scene)?;
        let description = SceneDescription::from_value(&payload, &label)?;
        self.scene_data = Some(payload);
        self.build_scene_code(description, label.clone());

        log::info!(
            "Loaded scene '{label}': {} entities in {:.2}ms",
            self.entity_count(),
            stopwatch.elapsed_millis()
        );
        Ok(())
    }

    /// Build the scene bundle from an already-fetched description
    pub fn load_scene_code(&mut self, data: &Value) -> Result<(), EcsError> {
        let description = SceneDescription::from_value(data, "inline")?;
        self.build_scene_code(description, "inline".to_string());
        Ok(())
    }

    fn build_scene_code(&mut self, description: SceneDescription, label: String) {
        let mut resolved: HashMap<&str, KindRegistration> = HashMap::new();
        for kind in description.kinds() {
            if let Some(registration) = self.resolve_kind(kind) {
                resolved.insert(kind, registration);
            }
        }

        let mut instantiated: Vec<ComponentKind> = Vec::new();
        for declared in &description.entities {
            let mut entity = Entity::new(declared.name.as_str());
            for (kind, record) in &declared.components {
                let Some(registration) = resolved.get(kind.as_str()) else {
                    continue;
                };
                entity.add_component(registration.create_component(record));
                if !instantiated.contains(&registration.kind) {
                    instantiated.push(registration.kind);
                }
            }
            self.insert_entity(entity);
        }

        // Several identifiers may resolve to the same kind; it still gets one system
        let mut system_kinds: Vec<ComponentKind> = Vec::new();
        let mut systems: Vec<Box<dyn System>> = Vec::new();
        for (id, registration) in &self.cache {
            if !resolved.contains_key(id.as_str()) || system_kinds.contains(&registration.kind) {
                continue;
            }
            system_kinds.push(registration.kind);
            systems.push(registration.create_system());
        }

        log::info!(
            "Scene '{label}': {} component kinds, {} systems",
            instantiated.len(),
            systems.len()
        );

        self.world_entity = description.world_entity.clone();
        self.scene_code = Some(SceneCode {
            label,
            kinds: instantiated,
            systems,
        });
        self.generation += 1;
    }

    fn resolve_kind(&mut self, kind: &str) -> Option<KindRegistration> {
        if let Some((_, cached)) = self.cache.iter().find(|(id, _)| id == kind) {
            return Some(*cached);
        }

        match self.resolver.resolve(kind) {
            Ok(registration) => {
                log::debug!("Resolved component kind '{kind}' as '{}'", registration.kind);
                self.cache.push((kind.to_string(), registration));
                Some(registration)
            }
            Err(err) => {
                log::warn!("Skipping component kind '{kind}': {err}");
                None
            }
        }
    }

    /// Run `load` then the per-entity load hook of every system, in bundle order
    pub fn load_systems(&mut self) -> Result<(), EcsError> {
        let Some(mut systems) = self.take_systems() else {
            log::warn!("load_systems called without a loaded scene");
            return Ok(());
        };
        let generation = self.generation;

        let mut result = Ok(());
        for system in systems.iter_mut() {
            log::debug!("Loading {}", system.name());
            result = system
                .load(self)
                .and_then(|()| system.load_entities(self));
            if result.is_err() {
                break;
            }
        }

        self.restore_systems(generation, systems);
        result
    }

    /// Run every system's frame hook once
    ///
    /// Does nothing without a scene bundle or while the render scene has no
    /// surface. Queued input is cleared afterwards either way.
    pub fn update_systems(&mut self, delta_time: f32) -> Result<(), EcsError> {
        if !self.render_scene.is_ready() {
            self.input.clear();
            return Ok(());
        }
        let Some(mut systems) = self.take_systems() else {
            self.input.clear();
            return Ok(());
        };
        let generation = self.generation;

        let mut result = Ok(());
        for system in systems.iter_mut() {
            result = system.update(self, delta_time);
            if result.is_err() {
                break;
            }
        }

        self.restore_systems(generation, systems);
        self.input.clear();
        result
    }

    /// Drop every entity and the scene bundle; resolved kinds stay cached
    pub fn unload_scene(&mut self) {
        if let Some(code) = self.scene_code.take() {
            log::info!("Unloading scene '{}'", code.label);
        }
        self.entities.clear();
        self.names.clear();
        self.order.clear();
        self.render_scene.clear();
        self.scene_data = None;
        self.world_entity = None;
        self.generation += 1;
    }

    /// Unload the current scene, then load and start `scene` from `collection`
    pub fn switch_scene(&mut self, scene: &str, collection: &str) -> Result<(), EcsError> {
        self.unload_scene();
        self.load_scene_data(scene, collection)?;
        self.load_systems()
    }

    // Systems are moved out while they run so hooks can borrow the world
    // mutably. A hook that reloads the scene bumps the generation, and the
    // stale list is dropped instead of restored.
    fn take_systems(&mut self) -> Option<Vec<Box<dyn System>>> {
        self.scene_code
            .as_mut()
            .map(|code| std::mem::take(&mut code.systems))
    }

    fn restore_systems(&mut self, generation: u64, systems: Vec<Box<dyn System>>) {
        if generation != self.generation {
            return;
        }
        if let Some(code) = self.scene_code.as_mut() {
            code.systems = systems;
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(
            super::ComponentRegistry::with_builtins(),
            crate::scene::MemorySceneSource::new(),
        )
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entity_count())
            .field("paused", &self.paused)
            .field("scene_code", &self.scene_code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentRegistry;
    use crate::scene::MemorySceneSource;

    fn empty_world() -> World {
        World::new(ComponentRegistry::new(), MemorySceneSource::new())
    }

    #[test]
    fn test_create_and_search() {
        let mut world = empty_world();
        let key = world.create_entity("Player");

        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.search("Player").unwrap().key(), Some(key));
        assert_eq!(world.search_key("Player"), Some(key));
        assert!(world.search("Nobody").is_none());
    }

    #[test]
    fn test_search_many_drops_unknown_names() {
        let mut world = empty_world();
        world.create_entity("A");
        world.create_entity("B");

        let found: Vec<_> = world
            .search_many(&["B", "Missing", "A"])
            .into_iter()
            .map(Entity::name)
            .collect();
        assert_eq!(found, ["B", "A"]);
    }

    #[test]
    fn test_same_name_replaces_in_place() {
        let mut world = empty_world();
        world.create_entity("A");
        let old = world.create_entity("B");
        world.create_entity("C");

        let new = world.create_entity("B");

        assert_ne!(old, new);
        assert!(!world.contains(old));
        assert_eq!(world.entity_count(), 3);
        let names: Vec<_> = world.entities().map(Entity::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_remove_entity_is_unconditional() {
        let mut world = empty_world();
        let key = world.create_entity("A");

        assert!(world.remove_entity("Missing").is_none());
        assert!(world.remove_entity("A").is_some());
        assert!(!world.contains(key));
        assert!(world.try_entity(key).is_err());
        assert_eq!(world.entities().count(), 0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut world = empty_world();
        assert!(!world.is_paused());
        assert!(world.toggle_pause());
        assert!(!world.toggle_pause());
    }

    #[test]
    fn test_update_without_scene_clears_input() {
        let mut world = empty_world();
        world.render_scene_mut().attach_surface(4, 3);
        world.push_input(InputEvent::KeyPressed(crate::input::KeyCode::P));

        world.update_systems(0.016).unwrap();
        assert!(world.input().is_empty());
    }

    #[test]
    fn test_from_config_attaches_surface() {
        let config = WorldConfig {
            start_paused: true,
            ..WorldConfig::default()
        };
        let world = World::from_config(&config, ComponentRegistry::new());

        assert!(world.is_paused());
        assert!(world.render_scene().is_ready());
        assert_eq!(world.render_scene().surface_size(), Some((1280, 720)));
    }
}
