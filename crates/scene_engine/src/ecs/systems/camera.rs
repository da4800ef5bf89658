//! Camera system

use crate::ecs::components::CameraComponent;
use crate::ecs::{
    ComponentKind, EcsError, EntityKey, EntityLoader, EntityProcessor, System, SystemBase,
    SystemType, World,
};
use crate::scene::CameraState;

/// Registers the active camera and keeps it on its entity
pub struct CameraSystem {
    base: SystemBase,
}

impl SystemType for CameraSystem {
    fn create(required: Vec<ComponentKind>) -> Self {
        Self {
            base: SystemBase::new("CameraSystem", required),
        }
    }
}

impl System for CameraSystem {
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

impl EntityLoader for CameraSystem {
    fn load_entity(&mut self, world: &mut World, entity: EntityKey) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        let camera = entity.get::<CameraComponent>()?;
        if !camera.active {
            return Ok(());
        }

        let state = CameraState {
            entity: entity.name().to_string(),
            fov_degrees: camera.fov,
            near: camera.near,
            far: camera.far,
            aspect: world.render_scene().aspect_ratio(),
            transform: entity.transform,
        };
        log::debug!("Active camera: '{}'", state.entity);
        world.render_scene_mut().set_camera(state);
        Ok(())
    }
}

impl EntityProcessor for CameraSystem {
    fn process_entity(
        &mut self,
        world: &mut World,
        entity: EntityKey,
        _delta_time: f32,
    ) -> Result<(), EcsError> {
        let entity = world.try_entity(entity)?;
        let name = entity.name().to_string();
        let transform = entity.transform;

        if let Some(camera) = world.render_scene_mut().camera_mut() {
            if camera.entity == name {
                camera.transform = transform;
            }
        }
        Ok(())
    }
}
