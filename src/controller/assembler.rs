use tracing::{debug, info, warn};

use super::animation::EntityRefs;
use crate::config::{AppConfig, CameraConfig};
use crate::model::{
    Airplane, Camera, EntityKind, GridHelper, LightRig, NodePath, NodeRef, Scene, SceneNode, Sea,
    Sky,
};

/// Scene, camera and the handles the animator needs, built once at startup.
pub struct Stage {
    pub scene: Scene,
    pub camera: Camera,
    pub refs: EntityRefs,
}

impl Stage {
    pub fn new(config: &AppConfig, width: u32, height: u32) -> Self {
        let (scene, refs) = assemble(config);
        Self {
            scene,
            camera: build_camera(&config.camera, width, height),
            refs,
        }
    }
}

pub fn build_camera(config: &CameraConfig, width: u32, height: u32) -> Camera {
    let mut camera = Camera::new(width, height);
    camera.fov_y = config.fov_y_degrees.to_radians();
    camera.z_near = config.z_near;
    camera.z_far = config.z_far;
    camera.set_position(config.position);
    camera
}

/// Assemble a fresh scene.
pub fn assemble(config: &AppConfig) -> (Scene, EntityRefs) {
    let mut scene = Scene::new();
    let refs = assemble_into(&mut scene, config);
    (scene, refs)
}

/// Attach every entity, light and the grid to `scene`. Entities already
/// present are left alone, so running this twice attaches nothing new.
pub fn assemble_into(scene: &mut Scene, config: &AppConfig) -> EntityRefs {
    let propeller_path = if scene.contains(EntityKind::Airplane) {
        debug!("airplane already attached");
        let found = scene
            .root(EntityKind::Airplane)
            .and_then(|root| find_path(root, "propeller"));
        if found.is_none() {
            warn!("attached airplane has no propeller, it will not spin");
        }
        found
    } else {
        let mut airplane = Airplane::new();
        airplane.root.set_uniform_scale(config.airplane.scale);
        airplane.root.position.y = config.airplane.initial_y;
        scene.attach(EntityKind::Airplane, airplane.root);
        Some(airplane.propeller)
    };

    if !scene.contains(EntityKind::Sea) {
        scene.attach(EntityKind::Sea, Sea::new().root);
    }
    if !scene.contains(EntityKind::Sky) {
        scene.attach(EntityKind::Sky, Sky::new().root);
    }

    for light in LightRig::new().lights() {
        scene.attach_light(light);
    }

    if let Some(grid_config) = config.grid {
        let mut grid = GridHelper::new(grid_config.size, grid_config.divisions);
        grid.y = grid_config.y;
        scene.set_grid(grid);
    }
    scene.fog = Some(config.fog);

    info!(
        roots = scene.root_count(),
        lights = scene.lights().len(),
        grid = scene.grid().is_some(),
        "scene assembled"
    );

    EntityRefs {
        airplane: NodeRef::root(EntityKind::Airplane),
        propeller: propeller_path.map(|path| NodeRef {
            kind: EntityKind::Airplane,
            path,
        }),
        sea: NodeRef::root(EntityKind::Sea),
        sky: NodeRef::root(EntityKind::Sky),
    }
}

fn find_path(root: &SceneNode, name: &str) -> Option<NodePath> {
    if root.name == name {
        return Some(NodePath::root());
    }
    root.children().iter().enumerate().find_map(|(i, child)| {
        find_path(child, name).map(|sub| {
            let mut path = NodePath::root().child(i);
            for &j in sub.indices() {
                path = path.child(j);
            }
            path
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Light;
    use glam::Vec3;

    #[test]
    fn test_each_entity_attached_once() {
        let (scene, refs) = assemble(&AppConfig::reference());
        assert!(scene.is_complete());
        assert_eq!(scene.root_count(), 3);
        assert_eq!(scene.lights().len(), 2);
        assert!(matches!(scene.lights()[0], Light::Hemisphere(_)));
        assert!(matches!(scene.lights()[1], Light::Directional(_)));
        let propeller = refs.propeller.as_ref().unwrap();
        assert_eq!(scene.node(propeller).map(|n| n.name), Some("propeller"));
        assert_eq!(scene.grid().map(|g| g.y), Some(-199.0));
    }

    #[test]
    fn test_reassembly_does_not_duplicate() {
        let (mut scene, refs) = assemble(&AppConfig::reference());
        let ids_before: Vec<_> = scene.roots().map(|r| r.id()).collect();

        let again = assemble_into(&mut scene, &AppConfig::reference());
        assert_eq!(again, refs);
        assert_eq!(scene.root_count(), 3);
        assert_eq!(scene.lights().len(), 2);
        let ids_after: Vec<_> = scene.roots().map(|r| r.id()).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn test_airplane_without_propeller_keeps_its_attitude() {
        let mut scene = Scene::new();
        scene.attach(EntityKind::Airplane, SceneNode::group("airplane"));
        let refs = assemble_into(&mut scene, &AppConfig::default());
        assert!(refs.propeller.is_none());
        assert!(scene.is_complete());

        let animator = crate::controller::Animator::new();
        for _ in 0..10 {
            animator.update(Default::default(), &mut scene, &refs);
        }
        let plane = scene.node(&refs.airplane).unwrap();
        assert_eq!(plane.rotation, Vec3::ZERO);
        assert_eq!(plane.position.y, 100.0);
    }

    #[test]
    fn test_airplane_post_construction_adjustment() {
        let (scene, refs) = assemble(&AppConfig::default());
        let plane = scene.node(&refs.airplane).unwrap();
        assert_eq!(plane.scale, Vec3::splat(0.25));
        assert_eq!(plane.position.y, 100.0);
        assert!(scene.grid().is_none());
    }

    #[test]
    fn test_stage_camera_from_config() {
        let stage = Stage::new(&AppConfig::default(), 1000, 800);
        assert_eq!(stage.camera.eye, Vec3::new(0.0, 100.0, 200.0));
        assert_eq!(stage.camera.aspect, 1.25);
        assert_eq!(stage.camera.z_far, 10000.0);
    }

    #[test]
    fn test_find_path_locates_nested_node() {
        let plane = Airplane::new();
        assert_eq!(find_path(&plane.root, "propeller"), Some(plane.propeller.clone()));
        let blade = find_path(&plane.root, "blade").unwrap();
        assert_eq!(plane.root.get(&blade).map(|n| n.name), Some("blade"));
        assert!(find_path(&plane.root, "rudder").is_none());
    }
}
