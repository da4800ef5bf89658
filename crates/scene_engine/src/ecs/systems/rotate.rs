//! Rotate system

use crate::ecs::components::RotateComponent;
use crate::ecs::{
    ComponentKind, ComponentType, EcsError, EntityKey, EntityProcessor, System, SystemBase,
    SystemType, World,
};
use crate::foundation::math::utils;

/// Spins entities; stops while the world is paused
pub struct RotateSystem {
    base: SystemBase,
}

impl SystemType for RotateSystem {
    fn create(required: Vec<ComponentKind>) -> Self {
        Self {
            base: SystemBase::new("RotateSystem", required).pauseable(true),
        }
    }
}

impl System for RotateSystem {
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

impl EntityProcessor for RotateSystem {
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        delta_time: f32,
    ) -> Result<(), EcsError> {
        let entity = world.try_entity_mut(entity)?;
        if !entity.get_component(RotateComponent::KIND)?.enabled {
            return Ok(());
        }

        let spin = entity.get::<RotateComponent>()?;
        let (axis, angle) = (utils::vec3(spin.axis), spin.speed * delta_time);
        entity.transform.rotate_around(axis, angle);
        Ok(())
    }
}
