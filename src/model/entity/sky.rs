use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use crate::model::colors;
use crate::model::geometry::{Geometry, Material, Renderable};
use crate::model::node::SceneNode;

const CLOUD_COUNT: u32 = 20;
const SKY_SEED: u32 = 0x5eed_c10d;

/// Ring of clouds around the sea axis.
pub struct Sky {
    pub root: SceneNode,
}

impl Sky {
    pub fn new() -> Self {
        let mut rng = CloudRng::new(SKY_SEED);
        let mut root = SceneNode::group("sky").at(Vec3::new(0.0, -600.0, 0.0));
        let step = TAU / CLOUD_COUNT as f32;

        for i in 0..CLOUD_COUNT {
            let mut cloud = build_cloud(&mut rng);
            let angle = step * i as f32;
            let distance = 750.0 + rng.next_f32() * 200.0;
            cloud.position = Vec3::new(
                angle.cos() * distance,
                angle.sin() * distance,
                -400.0 - rng.next_f32() * 400.0,
            );
            cloud.rotation.z = angle + FRAC_PI_2;
            cloud.set_uniform_scale(1.0 + rng.next_f32() * 2.0);
            root.add_child(cloud);
        }

        Self { root }
    }
}

impl Default for Sky {
    fn default() -> Self {
        Self::new()
    }
}

/// A loose stack of 3 to 5 white cubes.
fn build_cloud(rng: &mut CloudRng) -> SceneNode {
    let mut cloud = SceneNode::group("cloud");
    let blocks = 3 + (rng.next_f32() * 3.0) as u32;
    for i in 0..blocks {
        let mut block = SceneNode::with_renderable(
            "cloud_block",
            Renderable::shaded(Geometry::cuboid(20.0, 20.0, 20.0), Material::flat(colors::WHITE)),
        );
        block.position = Vec3::new(i as f32 * 15.0, rng.next_f32() * 10.0, rng.next_f32() * 10.0);
        block.rotation.z = rng.next_f32() * TAU;
        block.rotation.y = rng.next_f32() * TAU;
        block.set_uniform_scale(0.1 + rng.next_f32() * 0.9);
        cloud.add_child(block);
    }
    cloud
}

/// Counter-based hash generator: the same seed always yields the same sky.
struct CloudRng {
    seed: u32,
    counter: u32,
}

impl CloudRng {
    fn new(seed: u32) -> Self {
        Self { seed, counter: 0 }
    }

    /// Uniform in [0, 1).
    fn next_f32(&mut self) -> f32 {
        let mut n = self
            .counter
            .wrapping_mul(374_761_393)
            .wrapping_add(self.seed.wrapping_mul(668_265_263));
        n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
        n ^= n >> 16;
        self.counter = self.counter.wrapping_add(1);
        // top 24 bits keep the result strictly below 1.0
        (n >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_clouds_of_three_to_five_blocks() {
        let sky = Sky::new();
        assert_eq!(sky.root.children().len(), CLOUD_COUNT as usize);
        for cloud in sky.root.children() {
            let n = cloud.children().len();
            assert!((3..=5).contains(&n), "cloud with {n} blocks");
            assert!(cloud.scale.x >= 1.0 && cloud.scale.x <= 3.0);
            assert!(cloud.position.z <= -400.0 && cloud.position.z >= -800.0);
            let ring = cloud.position.truncate().length();
            assert!((749.9..950.1).contains(&ring), "ring distance {ring}");
        }
    }

    #[test]
    fn test_sky_is_deterministic() {
        assert!(Sky::new().root.same_structure(&Sky::new().root));
    }

    #[test]
    fn test_rng_range() {
        let mut rng = CloudRng::new(7);
        for _ in 0..10_000 {
            let r = rng.next_f32();
            assert!((0.0..1.0).contains(&r));
        }
    }
}
