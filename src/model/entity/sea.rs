use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::model::colors;
use crate::model::geometry::{Geometry, Material, Renderable};
use crate::model::node::SceneNode;

/// A huge translucent drum lying along Z; rolling it about Z reads as waves passing by.
pub struct Sea {
    pub root: SceneNode,
}

impl Sea {
    pub fn new() -> Self {
        let geometry = Geometry::Cylinder {
            radius_top: 600.0,
            radius_bottom: 600.0,
            height: 800.0,
            radial_segments: 40,
            height_segments: 10,
            rotate_x: -FRAC_PI_2,
        };
        let renderable = Renderable {
            geometry,
            material: Material::flat(colors::BLUE).with_opacity(0.6),
            cast_shadow: false,
            receive_shadow: true,
        };
        let root = SceneNode::with_renderable("sea", renderable).at(Vec3::new(0.0, -600.0, 0.0));
        Self { root }
    }
}

impl Default for Sea {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sea_sits_below_origin() {
        let sea = Sea::new();
        assert_eq!(sea.root.position.y, -600.0);
        let r = sea.root.renderable.as_ref().unwrap();
        assert!(r.receive_shadow);
        assert!(!r.cast_shadow);
        assert!(r.material.is_transparent());
        assert_eq!(r.material.opacity, 0.6);
        assert_eq!(r.material.color, colors::BLUE);
    }

    #[test]
    fn test_two_builds_match_with_fresh_ids() {
        let a = Sea::new();
        let b = Sea::new();
        assert!(a.root.same_structure(&b.root));
        let ids_b = b.root.ids();
        assert!(a.root.ids().iter().all(|id| !ids_b.contains(id)));
    }

    #[test]
    fn test_cylinder_dimensions() {
        let r = Sea::new().root.renderable.unwrap();
        match r.geometry {
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                height_segments,
                rotate_x,
            } => {
                assert_eq!((radius_top, radius_bottom, height), (600.0, 600.0, 800.0));
                assert_eq!((radial_segments, height_segments), (40, 10));
                assert_eq!(rotate_x, -FRAC_PI_2);
            }
            other => panic!("expected a cylinder, got {other:?}"),
        }
    }
}
