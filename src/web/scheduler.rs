//! `requestAnimationFrame` behind [`FrameScheduler`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::core::{BackdropError, FrameScheduler};

/// Slot holding the frame callback. Filled after the callback is built so the
/// callback can reach the state that owns this scheduler.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the shared frame callback on the window.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    /// Schedule `callback` on `window`.
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, BackdropError> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref().ok_or_else(|| {
            BackdropError::SchedulerUnavailable("frame callback not installed".to_string())
        })?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| BackdropError::SchedulerUnavailable(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle, e);
        }
    }
}
