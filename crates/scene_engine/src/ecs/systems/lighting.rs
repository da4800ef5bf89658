//! Lighting system
//!
//! Registers one light per entity in the render scene and keeps its
//! position, direction and enabled state in step with the entity.

use crate::ecs::components::LightComponent;
use crate::ecs::{
    ComponentKind, ComponentType, EcsError, Entity, EntityKey, EntityLoader, EntityProcessor,
    System, SystemBase, SystemType, World,
};
use crate::foundation::math::{utils, Vec3};
use crate::scene::LightState;

/// Turns light components into render-scene lights
pub struct LightingSystem {
    base: SystemBase,
}

impl SystemType for LightingSystem {
    fn create(required: Vec<ComponentKind>) -> Self {
        Self {
            base: SystemBase::new("LightingSystem", required),
        }
    }
}

impl System for LightingSystem {
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

/// World-space position and direction of the entity's light
fn placement(entity: &Entity, light: &LightComponent) -> (Vec3, Vec3) {
    let direction = entity.transform.rotation * utils::vec3(light.direction);
    (entity.transform.position, direction)
}

impl EntityLoader for LightingSystem {
    fn load_entity(&mut self, world: &mut World, entity: EntityKey) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        let light = entity.get::<LightComponent>()?;
        let (position, direction) = placement(entity, light);

        let state = LightState {
            kind: light.kind,
            color: utils::vec3(light.color),
            intensity: light.intensity,
            position,
            direction,
            enabled: entity.get_component(LightComponent::KIND)?.enabled,
        };
        let name = entity.name().to_string();
        world.render_scene_mut().upsert_light(&name, state);
        Ok(())
    }
}

impl EntityProcessor for LightingSystem {
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        _delta_time: f32,
    ) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        let light = entity.get::<LightComponent>()?;
        let (position, direction) = placement(entity, light);
        let enabled = entity.get_component(LightComponent::KIND)?.enabled;
        let name = entity.name().to_string();

        if let Some(state) = world.render_scene_mut().light_mut(&name) {
            state.position = position;
            state.direction = direction;
            state.enabled = enabled;
        }
        Ok(())
    }
}
