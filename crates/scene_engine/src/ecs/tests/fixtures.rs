//! Shared test kinds and worlds

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ecs::{
    Component, ComponentKind, ComponentRegistry, ComponentType, EcsError, EntityKey,
    EntityLoader, EntityProcessor, System, SystemBase, SystemType, World,
};
use crate::scene::MemorySceneSource;

/// The `Test` kind used by scene scenarios
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestComponent {
    pub test_value: String,
}

impl ComponentType for TestComponent {
    const KIND: ComponentKind = ComponentKind::new("Test");
}

/// Counts frames on every entity carrying `Test`
///
/// Loading fails on entities whose value is `"reject"`, frames fail on
/// entities whose value is `"fail"`.
pub struct TestSystem {
    base: SystemBase,
}

impl SystemType for TestSystem {
    fn create(required: Vec<ComponentKind>) -> Self {
        Self {
            base: SystemBase::new("TestSystem", required).pauseable(true),
        }
    }
}

impl System for TestSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn load(&mut self, _world: &mut World) -> Result<(), EcsError> {
        Ok(())
    }

    fn as_loader(&mut self) -> Option<&mut dyn EntityLoader> {
        Some(self)
    }

    fn as_processor(&mut self) -> Option<&mut dyn EntityProcessor> {
        Some(self)
    }
}

impl EntityLoader for TestSystem {
    fn load_entity(&mut self, world: &mut World, entity: EntityKey) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        if entity.get::<TestComponent>()?.test_value == "reject" {
            return Err(EcsError::Hook("test value not loadable".to_string()));
        }
        Ok(())
    }
}

impl EntityProcessor for TestSystem {
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        _delta_time: f32,
    ) -> Result<(), EcsError> {
        let entity = world.try_entity_mut(entity)?;
        let data = entity.get_mut::<TestComponent>()?;
        if data.test_value == "fail" {
            return Err(EcsError::Hook("test value rejected".to_string()));
        }
        data.test_value.push('+');
        Ok(())
    }
}

/// Marker kinds for query fixtures
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Alpha;

impl ComponentType for Alpha {
    const KIND: ComponentKind = ComponentKind::new("Alpha");
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Beta;

impl ComponentType for Beta {
    const KIND: ComponentKind = ComponentKind::new("Beta");
}

/// Registry with the `Test` kind only
pub fn test_registry() -> ComponentRegistry {
    ComponentRegistry::new().with::<TestComponent, TestSystem>()
}

/// World with the `Test` kind, an attached surface and `scenes` as its source
pub fn test_world(scenes: MemorySceneSource) -> World {
    let mut world = World::new(test_registry(), scenes);
    world.render_scene_mut().attach_surface(640, 480);
    world
}

/// Value of the `Test` component on `name`
pub fn test_value(world: &World, name: &str) -> String {
    world
        .search(name)
        .and_then(|entity| entity.get::<TestComponent>().ok())
        .map(|data| data.test_value.clone())
        .unwrap_or_default()
}

/// A scene with one `Test` component per `(entity, value)` pair
pub fn scene_of(entries: &[(&str, &str)]) -> Value {
    let mut entities = serde_json::Map::new();
    for (name, value) in entries {
        entities.insert(
            (*name).to_string(),
            serde_json::json!({ "components": { "Test": { "testValue": value } } }),
        );
    }
    serde_json::json!({ "entities": entities })
}

/// Build a component of a marker kind
pub fn marker<C: ComponentType>() -> Component {
    Component::new(C::default())
}
