//! Browser timers backed by `requestAnimationFrame` and `setInterval`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::Window;

use super::{FrameHandle, IntervalHandle, TimerHost};

/// Timer host for the browser. The two callbacks are created once and
/// reused for every request, so they live as long as the host.
pub struct WebTimers {
    window: Window,
    on_frame: Closure<dyn FnMut(f64)>,
    on_interval: Closure<dyn FnMut()>,
}

impl WebTimers {
    pub fn new(
        window: Window,
        on_frame: Closure<dyn FnMut(f64)>,
        on_interval: Closure<dyn FnMut()>,
    ) -> Self {
        Self {
            window,
            on_frame,
            on_interval,
        }
    }
}

impl TimerHost for WebTimers {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        match self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {e:?}", handle.0);
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Option<IntervalHandle> {
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.on_interval.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(id) => Some(IntervalHandle(id)),
            Err(e) => {
                log::error!("setInterval failed: {e:?}");
                None
            }
        }
    }

    fn clear_interval(&mut self, handle: IntervalHandle) {
        self.window.clear_interval_with_handle(handle.0);
    }
}
