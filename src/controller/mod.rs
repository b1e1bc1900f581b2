// CONTROLLER: input, assembly, animation and the frame loop
pub mod animation;
pub mod assembler;
pub mod frame_loop;
pub mod input;

pub use animation::{remap, Animator, EntityRefs};
pub use assembler::{assemble, assemble_into, Stage};
pub use frame_loop::{start, FrameLoopContext, FrameScheduler, FrameStats, SceneRenderer};
pub use input::{InputEvent, InputSample, InputState, SharedInput, Viewport};
