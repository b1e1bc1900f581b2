use glam::Vec2;

use super::input::InputSample;
use crate::config::AnimationConfig;
use crate::model::{NodeRef, Scene};

/// Linear map of `v` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn remap(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (v - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Nodes the animator mutates every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRefs {
    pub airplane: NodeRef,
    /// `None` when the attached airplane has no propeller to spin.
    pub propeller: Option<NodeRef>,
    pub sea: NodeRef,
    pub sky: NodeRef,
}

/// Advances the scene by one frame. Increments are per call, not per second.
pub struct Animator {
    config: AnimationConfig,
}

impl Animator {
    pub fn new() -> Self {
        Self::with_config(AnimationConfig::default())
    }

    pub fn with_config(config: AnimationConfig) -> Self {
        Self { config }
    }

    /// World-space (x, y) the airplane snaps to for a given sample.
    pub fn airplane_target(&self, sample: InputSample) -> Vec2 {
        let (x_min, x_max) = self.config.horizontal_range;
        let (y_min, y_max) = self.config.vertical_range;
        Vec2::new(
            remap(sample.x, -1.0, 1.0, x_min, x_max),
            remap(sample.y, -1.0, 1.0, y_min, y_max),
        )
    }

    pub fn update(&self, sample: InputSample, scene: &mut Scene, refs: &EntityRefs) {
        let target = self.airplane_target(sample);
        if let Some(plane) = scene.node_mut(&refs.airplane) {
            plane.position.y = target.y;
            plane.position.x = target.x;
        }

        if let Some(propeller) = refs.propeller.as_ref().and_then(|p| scene.node_mut(p)) {
            propeller.rotation.x += self.config.propeller_speed;
        }
        if let Some(sea) = scene.node_mut(&refs.sea) {
            sea.rotation.z += self.config.sea_speed;
        }
        if let Some(sky) = scene.node_mut(&refs.sky) {
            sky.rotation.z += self.config.sky_speed;
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
