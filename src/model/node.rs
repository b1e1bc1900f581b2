//! Composite scene nodes: a strict tree of local transforms with optional
//! renderable payloads.
//!
//! Children are owned by their parent, so cycles and shared nodes cannot be
//! expressed. Entities that need to reach a descendant every frame keep a
//! [`NodePath`] (child indices from their root) instead of a reference.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::geometry::Renderable;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a node. Never reused, never cloned into a
/// freshly built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Child-index path from an entity root to one of its descendants.
/// The empty path addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        NodePath(path)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

#[derive(Debug)]
pub struct SceneNode {
    id: NodeId,
    pub name: &'static str,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub renderable: Option<Renderable>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty grouping node at the origin.
    pub fn group(name: &'static str) -> Self {
        Self {
            id: NodeId::next(),
            name,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            renderable: None,
            children: Vec::new(),
        }
    }

    pub fn with_renderable(name: &'static str, renderable: Renderable) -> Self {
        Self {
            renderable: Some(renderable),
            ..Self::group(name)
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Attach `child` and return its index under this node.
    pub fn add_child(&mut self, child: SceneNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }

    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    pub fn get(&self, path: &NodePath) -> Option<&SceneNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut SceneNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get_mut(i))
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Depth-first walk handing every node its world matrix.
    pub fn visit_world(&self, parent: Mat4, f: &mut impl FnMut(&SceneNode, Mat4)) {
        let world = parent * self.local_matrix();
        f(self, world);
        for child in &self.children {
            child.visit_world(world, f);
        }
    }

    /// All node ids in depth-first order.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.node_count());
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<NodeId>) {
        out.push(self.id);
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// Same shape, transforms and payloads, ignoring node identity.
    pub fn same_structure(&self, other: &SceneNode) -> bool {
        self.name == other.name
            && self.position == other.position
            && self.rotation == other.rotation
            && self.scale == other.scale
            && self.renderable == other.renderable
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_structure(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::{Geometry, Material};
    use approx::assert_relative_eq;

    fn boxed(name: &'static str) -> SceneNode {
        SceneNode::with_renderable(
            name,
            Renderable::shaded(Geometry::cuboid(1.0, 1.0, 1.0), Material::flat(0xffffff)),
        )
    }

    #[test]
    fn test_child_world_composes_parent() {
        let mut root = SceneNode::group("root").at(Vec3::new(10.0, 0.0, 0.0));
        root.set_uniform_scale(2.0);
        let mut hub = boxed("hub").at(Vec3::new(0.0, 5.0, 0.0));
        hub.add_child(boxed("blade").at(Vec3::new(1.0, 0.0, 0.0)));
        root.add_child(hub);

        let mut worlds = Vec::new();
        root.visit_world(Mat4::IDENTITY, &mut |node, world| {
            worlds.push((node.name, world.transform_point3(Vec3::ZERO)));
        });

        assert_eq!(worlds.len(), 3);
        assert_eq!(worlds[1].0, "hub");
        assert_relative_eq!(worlds[1].1.y, 10.0);
        assert_eq!(worlds[2].0, "blade");
        assert_relative_eq!(worlds[2].1.x, 12.0);
        assert_relative_eq!(worlds[2].1.y, 10.0);
    }

    #[test]
    fn test_rotation_spins_children_around_parent() {
        let mut hub = SceneNode::group("hub");
        hub.add_child(boxed("blade").at(Vec3::new(0.0, 1.0, 0.0)));
        hub.rotation.x = std::f32::consts::FRAC_PI_2;

        let mut blade_world = Vec3::ZERO;
        hub.visit_world(Mat4::IDENTITY, &mut |node, world| {
            if node.name == "blade" {
                blade_world = world.transform_point3(Vec3::ZERO);
            }
        });
        assert_relative_eq!(blade_world.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(blade_world.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_path_lookup() {
        let mut root = SceneNode::group("root");
        root.add_child(boxed("a"));
        let mut b = boxed("b");
        let blade = b.add_child(boxed("blade"));
        let b_idx = root.add_child(b);

        let path = NodePath::root().child(b_idx).child(blade);
        assert_eq!(root.get(&path).map(|n| n.name), Some("blade"));
        root.get_mut(&path).unwrap().rotation.x = 1.0;
        assert_eq!(root.get(&path).unwrap().rotation.x, 1.0);
        assert!(root.get(&NodePath::root().child(7)).is_none());
        assert_eq!(root.get(&NodePath::root()).map(|n| n.name), Some("root"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = boxed("x");
        let b = boxed("x");
        assert_ne!(a.id(), b.id());
        assert!(a.same_structure(&b));
    }
}
