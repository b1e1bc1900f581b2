use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::animation::Animator;
use super::assembler::Stage;
use super::input::SharedInput;
use crate::model::{Camera, Scene};

/// Host primitive that calls back once before the next repaint
/// (`requestAnimationFrame` on the web). The callback receives a timestamp in ms.
pub trait FrameScheduler {
    fn request_next_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

/// Consumer of the scene state, one synchronous draw per call.
pub trait SceneRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera, stats: &FrameStats);
    fn resize(&mut self, width: u32, height: u32);
}

/// Frame counter with a frames-per-second estimate over one second windows.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub fps: f32,
    /// Host timestamp of the latest frame, in ms.
    pub now_ms: f64,
    window_start: Option<f64>,
    window_frames: u32,
}

impl FrameStats {
    pub fn sample(&mut self, now_ms: f64) {
        self.frames += 1;
        self.now_ms = now_ms;
        self.window_frames += 1;
        match self.window_start {
            None => {
                self.window_start = Some(now_ms);
                self.window_frames = 0;
            }
            Some(start) if now_ms - start >= 1000.0 => {
                self.fps = (self.window_frames as f64 * 1000.0 / (now_ms - start)) as f32;
                self.window_start = Some(now_ms);
                self.window_frames = 0;
            }
            Some(_) => {}
        }
    }
}

/// Main loop state: one cycle is stats, render, update.
pub struct FrameLoopContext<R> {
    pub stage: Stage,
    pub input: SharedInput,
    pub animator: Animator,
    pub renderer: R,
    pub stats: FrameStats,
}

impl<R: SceneRenderer> FrameLoopContext<R> {
    pub fn new(stage: Stage, input: SharedInput, animator: Animator, renderer: R) -> Self {
        Self {
            stage,
            input,
            animator,
            renderer,
            stats: FrameStats::default(),
        }
    }

    /// Draw the current state, then advance it. What `update` changes only
    /// shows up in the next frame.
    pub fn run_frame(&mut self, now_ms: f64) {
        self.stats.sample(now_ms);

        if let Some(viewport) = self.input.borrow_mut().take_resize() {
            debug!(width = viewport.width, height = viewport.height, "applying resize");
            self.stage.camera.set_aspect(viewport.width, viewport.height);
            self.renderer.resize(viewport.width, viewport.height);
        }

        self.renderer
            .render(&self.stage.scene, &self.stage.camera, &self.stats);

        let sample = self.input.borrow().sample();
        self.animator
            .update(sample, &mut self.stage.scene, &self.stage.refs);
    }
}

/// Run `run_frame` forever, rescheduling after each frame.
pub fn start<R: SceneRenderer + 'static>(
    ctx: Rc<RefCell<FrameLoopContext<R>>>,
    scheduler: Rc<dyn FrameScheduler>,
) {
    let next = scheduler.clone();
    scheduler.request_next_frame(Box::new(move |now_ms| {
        ctx.borrow_mut().run_frame(now_ms);
        start(ctx, next);
    }));
}
