// VIEW: GPU setup, scene rendering and the stats overlay
pub mod gpu_init;
pub mod overlay;
pub mod render;
pub mod shadow;

pub use gpu_init::GpuContext;
pub use render::{DrawList, RenderState};
