//! Headless scene runner
//!
//! Loads a scene into a world with the built-in kinds, steps it with a
//! fixed delta and reports the resulting entity state.

use std::path::Path;

use serde_json::{json, Value};

use scene_engine::ecs::components::PauseToggleComponent;
use scene_engine::foundation::time::{FrameClock, Stopwatch};
use scene_engine::prelude::*;

use crate::error::AppError;

/// Drives a loaded world frame by frame
pub struct Runner {
    world: World,
    clock: FrameClock,
    pause_key: KeyCode,
}

impl Runner {
    /// Wrap a world whose scene is already loaded
    pub fn new(world: World, fixed_delta: f32, pause_key: KeyCode) -> Self {
        Self {
            world,
            clock: FrameClock::fixed(fixed_delta),
            pause_key,
        }
    }

    /// Build a world from `config`, reading scenes from the configured root
    /// or, when given, from a bundle file
    pub fn from_config(config: &WorldConfig, bundle: Option<&Path>) -> Result<Self, AppError> {
        let registry = ComponentRegistry::with_builtins();
        let mut world = match bundle {
            Some(path) => {
                let bundle: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
                let source = MemorySceneSource::from_bundle(&bundle)?;
                let mut world = World::new(registry, source);
                world.set_paused(config.start_paused);
                world
                    .render_scene_mut()
                    .attach_surface(config.surface_width, config.surface_height);
                world
            }
            None => World::from_config(config, registry),
        };
        world.render_scene_mut().clear_color = [0.1, 0.1, 0.15];
        Ok(Self::new(world, config.fixed_delta, config.pause_key))
    }

    /// Load `scene` from `collection` and run every system's load hooks
    pub fn load(&mut self, scene: &str, collection: &str) -> Result<(), AppError> {
        self.world.load_scene_data(scene, collection)?;
        self.world.load_systems()?;
        Ok(())
    }

    /// Advance one frame, pressing the pause key first if `press_pause`
    pub fn step(&mut self, press_pause: bool) -> Result<(), AppError> {
        if press_pause {
            let key = self.pause_binding();
            self.world.push_input(InputEvent::KeyPressed(key));
        }
        let delta_time = self.clock.tick();
        self.world.update_systems(delta_time)?;
        Ok(())
    }

    /// Run `frames` frames, pressing the pause key on each frame index in
    /// `pause_frames`
    pub fn run(&mut self, frames: u64, pause_frames: &[u64]) -> Result<(), AppError> {
        let stopwatch = Stopwatch::start_new();
        for frame in 0..frames {
            self.step(pause_frames.contains(&frame))?;
        }
        log::info!(
            "Ran {frames} frames ({:.2}s simulated) in {:.2}ms",
            self.clock.total_time(),
            stopwatch.elapsed_millis()
        );
        Ok(())
    }

    /// Key bound by the scene's first `PauseToggle`, or the configured key
    /// when the scene has none
    pub fn pause_binding(&self) -> KeyCode {
        self.world
            .entities_with(&[PauseToggleComponent::KIND])
            .into_iter()
            .find_map(|entity| entity.get::<PauseToggleComponent>().ok())
            .map_or(self.pause_key, |toggle| toggle.key)
    }

    /// The world being run
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Frames, simulated time, pause state and every entity snapshot
    pub fn report(&self) -> Value {
        let entities: Vec<Value> = self.world.entities().map(Entity::serialize).collect();
        json!({
            "frames": self.clock.frame_count(),
            "time": self.clock.total_time(),
            "paused": self.world.is_paused(),
            "entities": entities,
        })
    }
}
