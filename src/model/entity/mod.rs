//! Procedural builders, one per visual entity. Each call returns a fresh tree.
pub mod airplane;
pub mod light_rig;
pub mod sea;
pub mod sky;

pub use airplane::Airplane;
pub use light_rig::LightRig;
pub use sea::Sea;
pub use sky::Sky;
