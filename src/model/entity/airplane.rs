use glam::Vec3;

use crate::model::colors;
use crate::model::geometry::{Geometry, Material, Renderable};
use crate::model::node::{NodePath, SceneNode};

/// Low-poly airplane. The propeller hub spins every frame, the blade rides on it.
pub struct Airplane {
    pub root: SceneNode,
    pub propeller: NodePath,
}

impl Airplane {
    pub fn new() -> Self {
        let mut root = SceneNode::group("airplane");

        root.add_child(part("cockpit", Geometry::cuboid(60.0, 50.0, 50.0), colors::RED));
        root.add_child(
            part("engine", Geometry::cuboid(20.0, 50.0, 50.0), colors::WHITE)
                .at(Vec3::new(40.0, 0.0, 0.0)),
        );
        root.add_child(
            part("tail", Geometry::cuboid(15.0, 20.0, 5.0), colors::RED)
                .at(Vec3::new(-35.0, 24.0, 0.0)),
        );
        root.add_child(part("wing", Geometry::cuboid(40.0, 8.0, 150.0), colors::RED));

        let mut propeller = part("propeller", Geometry::cuboid(20.0, 10.0, 10.0), colors::BROWN)
            .at(Vec3::new(50.0, 0.0, 0.0));
        propeller.add_child(
            part("blade", Geometry::cuboid(1.0, 100.0, 20.0), colors::BROWN_DARK)
                .at(Vec3::new(8.0, 0.0, 0.0)),
        );
        let propeller = NodePath::root().child(root.add_child(propeller));

        Self { root, propeller }
    }
}

impl Default for Airplane {
    fn default() -> Self {
        Self::new()
    }
}

fn part(name: &'static str, geometry: Geometry, color: u32) -> SceneNode {
    SceneNode::with_renderable(name, Renderable::shaded(geometry, Material::flat(color)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blade_hangs_off_propeller() {
        let plane = Airplane::new();
        let propeller = plane.root.get(&plane.propeller).unwrap();
        assert_eq!(propeller.name, "propeller");
        assert_eq!(propeller.position, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(propeller.children().len(), 1);
        assert_eq!(propeller.children()[0].name, "blade");
        assert_eq!(propeller.children()[0].position, Vec3::new(8.0, 0.0, 0.0));
    }

    #[test]
    fn test_every_part_casts_and_receives_shadows() {
        let plane = Airplane::new();
        assert_eq!(plane.root.node_count(), 7);
        let mut parts = 0;
        plane.root.visit_world(glam::Mat4::IDENTITY, &mut |node, _| {
            if let Some(r) = &node.renderable {
                parts += 1;
                assert!(r.cast_shadow && r.receive_shadow, "{}", node.name);
                assert!(r.material.flat_shading);
            }
        });
        assert_eq!(parts, 6);
    }

    #[test]
    fn test_builds_are_independent() {
        let mut a = Airplane::new();
        let b = Airplane::new();
        assert!(a.root.same_structure(&b.root));
        let ids_b = b.root.ids();
        assert!(a.root.ids().iter().all(|id| !ids_b.contains(id)));

        a.root.get_mut(&a.propeller).unwrap().rotation.x = 1.0;
        assert_eq!(b.root.get(&b.propeller).unwrap().rotation.x, 0.0);
    }
}
