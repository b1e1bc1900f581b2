pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

pub use config::AppConfig;
pub use error::AppError;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tracing::{error, info};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlCanvasElement, MouseEvent, Window};

    use crate::config::AppConfig;
    use crate::controller::input::wasm::{mouse_move_to_input, resize_to_input, window_size};
    use crate::controller::{self, Animator, FrameLoopContext, FrameScheduler, InputState, SharedInput, Stage};
    use crate::error::AppError;
    use crate::view::{GpuContext, RenderState};

    /// Element the canvas is mounted into.
    const CONTAINER_ID: &str = "world";

    pub async fn setup_app() -> Result<(), AppError> {
        let (window, document, container) = resolve_environment()?;
        let (width, height) = window_size(&window).unwrap_or((800, 600));
        let canvas = create_canvas(&document, &container, width, height)?;

        let config = AppConfig::default();
        let stage = Stage::new(&config, width, height);

        let gpu = GpuContext::new(&canvas, width, height).await?;
        let renderer = RenderState::new(gpu, 1.0, &stage.scene);
        let input = InputState::shared(width, height);
        setup_input_listeners(&window, &canvas, input.clone())?;

        let animator = Animator::with_config(config.animation);
        let ctx = Rc::new(RefCell::new(FrameLoopContext::new(stage, input, animator, renderer)));
        info!(width, height, "starting frame loop");
        controller::start(ctx, Rc::new(RafScheduler { window }));
        Ok(())
    }

    fn resolve_environment() -> Result<(Window, Document, Element), AppError> {
        let window = web_sys::window().ok_or(AppError::MissingEnvironment("global `window`"))?;
        let document = window
            .document()
            .ok_or(AppError::MissingEnvironment("document on window"))?;
        let container = document
            .get_element_by_id(CONTAINER_ID)
            .ok_or(AppError::MissingEnvironment("#world container"))?;
        Ok((window, document, container))
    }

    fn create_canvas(
        document: &Document,
        container: &Element,
        width: u32,
        height: u32,
    ) -> Result<HtmlCanvasElement, AppError> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::Js("failed to create canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        container.append_child(&canvas)?;
        Ok(canvas)
    }

    fn setup_input_listeners(
        window: &Window,
        canvas: &HtmlCanvasElement,
        input: SharedInput,
    ) -> Result<(), AppError> {
        // Mouse move: last position wins
        {
            let input = input.clone();
            let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
                input.borrow_mut().process_event(&mouse_move_to_input(&e));
            }) as Box<dyn FnMut(_)>);
            window.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
            mm.forget();
        }

        // Resize: canvas follows the window, camera and surface on the next frame
        {
            let canvas = canvas.clone();
            let win = window.clone();
            let resize = Closure::wrap(Box::new(move |_e: Event| {
                if let Some(event) = resize_to_input(&win) {
                    if let controller::InputEvent::Resize { width, height } = event {
                        canvas.set_width(width);
                        canvas.set_height(height);
                    }
                    input.borrow_mut().process_event(&event);
                }
            }) as Box<dyn FnMut(_)>);
            window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
            resize.forget();
        }
        Ok(())
    }

    /// `requestAnimationFrame` as a frame scheduler.
    struct RafScheduler {
        window: Window,
    }

    impl FrameScheduler for RafScheduler {
        fn request_next_frame(&self, callback: Box<dyn FnOnce(f64)>) {
            let cb = Closure::once_into_js(move |now_ms: f64| callback(now_ms));
            if let Err(e) = self.window.request_animation_frame(cb.unchecked_ref()) {
                error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    logging::init();
    web::setup_app().await.map_err(|e| {
        tracing::error!("startup failed: {e}");
        wasm_bindgen::JsValue::from(e)
    })
}
