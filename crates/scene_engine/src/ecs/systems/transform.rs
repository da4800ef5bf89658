//! Transform system
//!
//! Applies the scene's initial placement to each entity once, then keeps
//! the render scene's node state in step with the entity every frame.

use crate::ecs::components::TransformComponent;
use crate::ecs::{
    ComponentKind, ComponentType, EcsError, EntityKey, EntityLoader, EntityProcessor, System,
    SystemBase, SystemType, World,
};
use crate::scene::NodeState;

/// Syncs entity transforms into the render scene
pub struct TransformSystem {
    base: SystemBase,
}

impl SystemType for TransformSystem {
    fn create(required: Vec<ComponentKind>) -> Self {
        Self {
            base: SystemBase::new("TransformSystem", required),
        }
    }
}

impl System for TransformSystem {
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

impl EntityLoader for TransformSystem {
    fn load_entity(&mut self, world: &mut World, entity: EntityKey) -> Result<(), EcsError> {
        let entity = world.try_entity_mut(entity)?;
        entity.transform = entity.get::<TransformComponent>()?.to_transform();
        Ok(())
    }
}

impl EntityProcessor for TransformSystem {
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        _delta_time: f32,
    ) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        let enabled = entity.get_component(TransformComponent::KIND)?.enabled;
        let name = entity.name().to_string();
        let node = NodeState {
            transform: entity.transform,
            visible: entity.visible && enabled,
        };

        world.render_scene_mut().sync_node(&name, node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, ComponentRegistry};
    use crate::foundation::math::Vec3;
    use crate::scene::MemorySceneSource;
    use approx::assert_relative_eq;

    fn world_with_box(position: [f32; 3]) -> (World, EntityKey) {
        let mut world = World::new(ComponentRegistry::new(), MemorySceneSource::new());
        let key = world.create_entity("Box");
        world
            .entity_mut(key)
            .unwrap()
            .add_component(Component::new(TransformComponent::from_position(position)));
        (world, key)
    }

    #[test]
    fn test_load_applies_initial_placement() {
        let (mut world, key) = world_with_box([1.0, 2.0, 3.0]);
        let mut system = TransformSystem::create(vec![TransformComponent::KIND]);

        system.load_entities(&mut world).unwrap();

        let transform = world.entity(key).unwrap().transform;
        assert_relative_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_update_syncs_node() {
        let (mut world, key) = world_with_box([0.0, 5.0, 0.0]);
        let mut system = TransformSystem::create(vec![TransformComponent::KIND]);
        system.load_entities(&mut world).unwrap();

        world.entity_mut(key).unwrap().visible = false;
        system.update(&mut world, 0.016).unwrap();

        let node = world.render_scene().node("Box").unwrap();
        assert_relative_eq!(node.transform.position, Vec3::new(0.0, 5.0, 0.0));
        assert!(!node.visible);
        assert!(!system.is_pauseable());
    }
}
