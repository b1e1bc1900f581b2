use glam::Mat4;
use tracing::warn;

use super::geometry::GridHelper;
use super::light::Light;
use super::node::{NodePath, SceneNode};
use crate::config::FogConfig;

/// Slot an entity root occupies in the scene. One root per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Airplane,
    Sea,
    Sky,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Airplane, EntityKind::Sea, EntityKind::Sky];
}

/// Address of a node inside an attached entity tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub kind: EntityKind,
    pub path: NodePath,
}

impl NodeRef {
    pub fn root(kind: EntityKind) -> Self {
        Self {
            kind,
            path: NodePath::root(),
        }
    }
}

/// Everything a frame draws: entity roots, lights, fog and the optional grid.
#[derive(Default)]
pub struct Scene {
    roots: Vec<(EntityKind, SceneNode)>,
    lights: Vec<Light>,
    grid: Option<GridHelper>,
    pub fog: Option<FogConfig>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an entity root. A second root for an already attached kind is
    /// rejected and the existing one kept.
    pub fn attach(&mut self, kind: EntityKind, root: SceneNode) -> bool {
        if self.contains(kind) {
            warn!(?kind, "entity already attached, ignoring duplicate root");
            return false;
        }
        self.roots.push((kind, root));
        true
    }

    pub fn attach_light(&mut self, light: Light) -> bool {
        if self.lights.contains(&light) {
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn set_grid(&mut self, grid: GridHelper) {
        self.grid = Some(grid);
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        self.roots.iter().any(|(k, _)| *k == kind)
    }

    pub fn is_complete(&self) -> bool {
        EntityKind::ALL.iter().all(|k| self.contains(*k))
    }

    pub fn root(&self, kind: EntityKind) -> Option<&SceneNode> {
        self.roots.iter().find(|(k, _)| *k == kind).map(|(_, n)| n)
    }

    pub fn root_mut(&mut self, kind: EntityKind) -> Option<&mut SceneNode> {
        self.roots.iter_mut().find(|(k, _)| *k == kind).map(|(_, n)| n)
    }

    pub fn node(&self, node: &NodeRef) -> Option<&SceneNode> {
        self.root(node.kind)?.get(&node.path)
    }

    pub fn node_mut(&mut self, node: &NodeRef) -> Option<&mut SceneNode> {
        self.root_mut(node.kind)?.get_mut(&node.path)
    }

    pub fn roots(&self) -> impl Iterator<Item = &SceneNode> {
        self.roots.iter().map(|(_, n)| n)
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn grid(&self) -> Option<&GridHelper> {
        self.grid.as_ref()
    }

    /// Walk every attached tree with world matrices.
    pub fn visit_world(&self, f: &mut impl FnMut(&SceneNode, Mat4)) {
        for (_, root) in &self.roots {
            root.visit_world(Mat4::IDENTITY, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_duplicate_kind_rejected() {
        let mut scene = Scene::new();
        assert!(scene.attach(EntityKind::Sea, SceneNode::group("sea")));
        assert!(!scene.attach(EntityKind::Sea, SceneNode::group("sea2")));
        assert_eq!(scene.root_count(), 1);
        assert_eq!(scene.root(EntityKind::Sea).unwrap().name, "sea");
        assert!(!scene.is_complete());
    }

    #[test]
    fn test_node_ref_resolves_into_tree() {
        let mut scene = Scene::new();
        let mut root = SceneNode::group("airplane");
        let idx = root.add_child(SceneNode::group("propeller").at(Vec3::X));
        scene.attach(EntityKind::Airplane, root);

        let prop = NodeRef {
            kind: EntityKind::Airplane,
            path: NodePath::root().child(idx),
        };
        scene.node_mut(&prop).unwrap().rotation.x += 0.3;
        assert_eq!(scene.node(&prop).unwrap().rotation.x, 0.3);
        assert!(scene.node(&NodeRef::root(EntityKind::Sky)).is_none());
    }
}
