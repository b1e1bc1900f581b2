/// Platform-agnostic pointer sampling
use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

/// Platform-independent input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in device pixels, origin top-left.
    PointerMove { x: f32, y: f32 },
    Resize { width: u32, height: u32 },
}

/// Last seen pointer position, normalized to [-1, 1] with +y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSample {
    pub x: f32,
    pub y: f32,
}

impl InputSample {
    /// Map a pixel position on a `width` x `height` viewport into the signed
    /// unit square. Returns `None` for a degenerate viewport.
    pub fn from_pointer(px: f32, py: f32, width: f32, height: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let x = -1.0 + (px / width) * 2.0;
        let y = 1.0 - (py / height) * 2.0;
        Some(Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Input shared between event handlers and the frame loop.
/// Pointer moves overwrite the sample, nothing is queued.
pub struct InputState {
    sample: InputSample,
    viewport: Viewport,
    pending_resize: Option<Viewport>,
}

pub type SharedInput = Rc<RefCell<InputState>>;

impl InputState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            sample: InputSample::default(),
            viewport: Viewport { width, height },
            pending_resize: None,
        }
    }

    pub fn shared(width: u32, height: u32) -> SharedInput {
        Rc::new(RefCell::new(Self::new(width, height)))
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                match InputSample::from_pointer(
                    x,
                    y,
                    self.viewport.width as f32,
                    self.viewport.height as f32,
                ) {
                    Some(sample) => self.sample = sample,
                    None => warn!(viewport = ?self.viewport, "pointer move on empty viewport ignored"),
                }
            }
            InputEvent::Resize { width, height } => {
                let viewport = Viewport { width, height };
                if viewport != self.viewport {
                    debug!(width, height, "viewport resized");
                    self.viewport = viewport;
                    self.pending_resize = Some(viewport);
                }
            }
        }
    }

    pub fn sample(&self) -> InputSample {
        self.sample
    }

    /// Hand out a resize exactly once.
    pub fn take_resize(&mut self) -> Option<Viewport> {
        self.pending_resize.take()
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::{MouseEvent, Window};

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerMove {
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        }
    }

    /// Inner size of the browser window, if the host reports one.
    pub fn window_size(window: &Window) -> Option<(u32, u32)> {
        let w = window.inner_width().ok()?.as_f64()?;
        let h = window.inner_height().ok()?.as_f64()?;
        Some((w as u32, h as u32))
    }

    pub fn resize_to_input(window: &Window) -> Option<InputEvent> {
        window_size(window).map(|(width, height)| InputEvent::Resize { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_sample_is_centered() {
        let state = InputState::new(1000, 800);
        assert_eq!(state.sample(), InputSample { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_top_left_corner_maps_to_minus_one_one() {
        let mut state = InputState::new(1000, 800);
        state.process_event(&InputEvent::PointerMove { x: 0.0, y: 0.0 });
        assert_eq!(state.sample(), InputSample { x: -1.0, y: 1.0 });
    }

    #[test]
    fn test_center_and_bottom_right() {
        let mut state = InputState::new(1000, 800);
        state.process_event(&InputEvent::PointerMove { x: 500.0, y: 400.0 });
        assert_relative_eq!(state.sample().x, 0.0);
        assert_relative_eq!(state.sample().y, 0.0);
        state.process_event(&InputEvent::PointerMove { x: 1000.0, y: 800.0 });
        assert_eq!(state.sample(), InputSample { x: 1.0, y: -1.0 });
    }

    #[test]
    fn test_last_write_wins() {
        let mut state = InputState::new(100, 100);
        state.process_event(&InputEvent::PointerMove { x: 10.0, y: 10.0 });
        state.process_event(&InputEvent::PointerMove { x: 75.0, y: 25.0 });
        assert_relative_eq!(state.sample().x, 0.5);
        assert_relative_eq!(state.sample().y, 0.5);
    }

    #[test]
    fn test_outside_viewport_is_clamped() {
        let mut state = InputState::new(100, 100);
        state.process_event(&InputEvent::PointerMove { x: -50.0, y: 400.0 });
        assert_eq!(state.sample(), InputSample { x: -1.0, y: -1.0 });
    }

    #[test]
    fn test_zero_viewport_keeps_previous_sample() {
        let mut state = InputState::new(100, 100);
        state.process_event(&InputEvent::PointerMove { x: 0.0, y: 0.0 });
        state.process_event(&InputEvent::Resize { width: 0, height: 0 });
        state.process_event(&InputEvent::PointerMove { x: 50.0, y: 50.0 });
        assert_eq!(state.sample(), InputSample { x: -1.0, y: 1.0 });
    }

    #[test]
    fn test_resize_changes_normalization_and_is_taken_once() {
        let mut state = InputState::new(100, 100);
        state.process_event(&InputEvent::Resize { width: 200, height: 100 });
        assert_eq!(state.take_resize(), Some(Viewport { width: 200, height: 100 }));
        assert_eq!(state.take_resize(), None);
        state.process_event(&InputEvent::PointerMove { x: 100.0, y: 50.0 });
        assert_relative_eq!(state.sample().x, 0.0);

        // same size again is not a resize
        state.process_event(&InputEvent::Resize { width: 200, height: 100 });
        assert_eq!(state.take_resize(), None);
    }
}
