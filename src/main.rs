use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};
use winit::{event::*, event_loop::EventLoop, window::Window};

use aviator::controller::{Animator, FrameLoopContext, InputEvent, InputState, Stage};
use aviator::view::{GpuContext, RenderState};
use aviator::{logging, AppConfig};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("The Aviator")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    #[allow(deprecated)]
    let window = Arc::new(event_loop.create_window(window_attributes)?);
    let size = window.inner_size();

    let gpu = pollster::block_on(GpuContext::new_native(window.clone(), size.width, size.height))?;
    let config = AppConfig::default();
    let stage = Stage::new(&config, size.width, size.height);
    let renderer = RenderState::new(gpu, window.scale_factor() as f32, &stage.scene);
    let input = InputState::shared(size.width, size.height);
    let mut ctx = FrameLoopContext::new(
        stage,
        input.clone(),
        Animator::with_config(config.animation),
        renderer,
    );

    let started = Instant::now();
    info!(width = size.width, height = size.height, "starting frame loop");

    #[allow(deprecated)]
    let result = event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { ref event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                input.borrow_mut().process_event(&InputEvent::PointerMove {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::Resized(physical_size) => {
                input.borrow_mut().process_event(&InputEvent::Resize {
                    width: physical_size.width,
                    height: physical_size.height,
                });
            }
            WindowEvent::RedrawRequested => {
                ctx.run_frame(started.elapsed().as_secs_f64() * 1000.0);
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        Event::LoopExiting => info!(frames = ctx.stats.frames, "exiting"),
        _ => {}
    });

    result.map_err(|e| {
        error!("event loop failed: {e}");
        e.into()
    })
}
