//! The per-frame update step.
//!
//! [`FrameDriver::tick`] runs once per display refresh:
//!
//! 1. Snapshot every control into a [`WaveParams`].
//! 2. Apply the snapshot to the field (diff, then setters).
//! 3. Sync the scene, rebuilding the point cloud if the shape changed.
//! 4. Produce the displacement inputs for this frame and advance wave time.
//!
//! Rendering the returned [`FrameUpdate`] is left to the caller. Pointer
//! moves arrive between ticks through [`FrameDriver::set_pointer`]; a tick
//! only reads the stored position.

use glam::Vec3;

use crate::controls::{read_params, ControlSource};
use crate::displacement::DisplacementInputs;
use crate::field::ParticleField;
use crate::params::{ParamsDiff, WaveParams};
use crate::scene::Scene;
use crate::time::FrameClock;

/// Result of one tick.
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    /// Uniform inputs for this frame's draw.
    pub inputs: DisplacementInputs,
    /// The point cloud was replaced this tick.
    pub rebuilt: bool,
    /// What the control snapshot changed.
    pub diff: ParamsDiff,
}

pub struct FrameDriver {
    field: ParticleField,
    scene: Scene,
    clock: FrameClock,
    pointer: Vec3,
}

impl FrameDriver {
    /// Create the field for `params` and place it in a new scene.
    pub fn new(params: WaveParams) -> Self {
        let field = ParticleField::new(params);
        let mut scene = Scene::new();
        field.attach(&mut scene);

        Self {
            field,
            scene,
            clock: FrameClock::new(),
            // Repulsion centre until the first pointer move.
            pointer: Vec3::new(params.width as f32, params.height as f32, 0.0),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn pointer(&self) -> Vec3 {
        self.pointer
    }

    /// Store the pointer's world position for the next tick.
    pub fn set_pointer(&mut self, world: Vec3) {
        if !world.is_finite() {
            tracing::trace!(?world, "pointer projected to a non-finite position");
        }
        self.pointer = world;
    }

    /// Run one frame of updates against the current controls.
    pub fn tick(&mut self, controls: &dyn ControlSource) -> FrameUpdate {
        let snapshot = read_params(controls);
        let diff = self.field.apply(&snapshot);
        if !diff.is_empty() {
            tracing::trace!(?diff, "parameters changed");
        }

        let rebuilt = self.field.sync_scene(&mut self.scene);
        if rebuilt {
            let params = self.field.params();
            tracing::debug!(
                width = params.width,
                height = params.height,
                spread = params.spread,
                points = self.field.points().len(),
                generation = self.field.points().generation,
                "rebuilt particle field"
            );
        }

        let time = self.clock.tick();
        FrameUpdate {
            inputs: self.field.inputs(time, self.pointer),
            rebuilt,
            diff,
        }
    }
}
