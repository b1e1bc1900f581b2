// MODEL: scene graph, entities and camera
pub mod camera;
pub mod colors;
pub mod entity;
pub mod geometry;
pub mod light;
pub mod node;
pub mod scene;

pub use camera::{Camera, CameraUniform};
pub use entity::{Airplane, LightRig, Sea, Sky};
pub use geometry::{Geometry, GridHelper, Material, Renderable};
pub use light::{shadow_caster, DirectionalLight, HemisphereLight, Light, LightingUniform};
pub use node::{NodeId, NodePath, SceneNode};
pub use scene::{EntityKind, NodeRef, Scene};
