//! Pause system
//!
//! Never pauseable itself, so the same key can resume the world.

use crate::ecs::components::PauseToggleComponent;
use crate::ecs::{
    ComponentKind, ComponentType, EcsError, EntityKey, EntityProcessor, System, SystemBase,
    SystemType, World,
};

/// Flips the world pause flag on key presses
pub struct PauseSystem {
    base: SystemBase,
}

impl SystemType for PauseSystem {
    fn create(required: Vec<ComponentKind>) -> Self {
        Self {
            base: SystemBase::new("PauseSystem", required),
        }
    }
}

impl System for PauseSystem {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn load(&mut self, _world: &mut World) -> Result<(), EcsError> {
        Ok(())
    }

    fn as_processor(&mut self) -> Option<&mut dyn EntityProcessor> {
        Some(self)
    }
}

impl EntityProcessor for PauseSystem {
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        _delta_time: f32,
    ) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        if !entity.get_component(PauseToggleComponent::KIND)?.enabled {
            return Ok(());
        }

        let key = entity.get::<PauseToggleComponent>()?.key;
        if world.input().was_pressed(key) {
            world.toggle_pause();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, ComponentRegistry};
    use crate::input::{InputEvent, KeyCode};
    use crate::scene::MemorySceneSource;

    #[test]
    fn test_key_press_toggles_pause() {
        let mut world = World::new(ComponentRegistry::new(), MemorySceneSource::new());
        let key = world.create_entity("Controls");
        world
            .entity_mut(key)
            .unwrap()
            .add_component(Component::new(PauseToggleComponent::default()));
        let mut system = PauseSystem::create(vec![PauseToggleComponent::KIND]);

        system.update(&mut world, 0.016).unwrap();
        assert!(!world.is_paused());

        world.push_input(InputEvent::KeyPressed(KeyCode::Space));
        system.update(&mut world, 0.016).unwrap();
        assert!(!world.is_paused());

        world.push_input(InputEvent::KeyPressed(KeyCode::P));
        system.update(&mut world, 0.016).unwrap();
        assert!(world.is_paused());
    }
}
