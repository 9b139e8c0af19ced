//! Platform abstraction layer
//!
//! The simulation is driven by two host timers: a per-refresh frame callback
//! and a repeating spawn interval. Both are requested and cancelled through
//! `TimerHost` so the lifecycle can be exercised without a browser.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Pending frame callback (requestAnimationFrame id on the web)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Repeating timer (setInterval id on the web)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalHandle(pub i32);

/// Host timer services
pub trait TimerHost {
    /// Ask for one callback at the next display refresh
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Start the repeating spawn timer
    fn start_interval(&mut self, period_ms: u32) -> Option<IntervalHandle>;
    fn clear_interval(&mut self, handle: IntervalHandle);
}

/// Host that records requests and lets the caller fire them by hand.
/// Used by the native demo run and by tests.
#[derive(Debug, Default)]
pub struct ManualTimers {
    next_id: i32,
    /// Outstanding frame request, if any
    pub pending_frame: Option<FrameHandle>,
    /// Active intervals and their periods
    pub intervals: Vec<(IntervalHandle, u32)>,
    pub frames_requested: u32,
    pub frames_cancelled: u32,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Consume the pending frame request (the host "fires" it)
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub fn interval_active(&self) -> bool {
        !self.intervals.is_empty()
    }
}

impl TimerHost for ManualTimers {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.allocate());
        self.pending_frame = Some(handle);
        self.frames_requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
            self.frames_cancelled += 1;
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Option<IntervalHandle> {
        let handle = IntervalHandle(self.allocate());
        self.intervals.push((handle, period_ms));
        Some(handle)
    }

    fn clear_interval(&mut self, handle: IntervalHandle) {
        self.intervals.retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timers_cancel_only_matching() {
        let mut host = ManualTimers::new();
        let first = host.request_frame().unwrap();
        let second = host.request_frame().unwrap();
        host.cancel_frame(first);
        assert_eq!(host.pending_frame, Some(second));
        host.cancel_frame(second);
        assert_eq!(host.pending_frame, None);
        assert_eq!(host.frames_cancelled, 1);
    }

    #[test]
    fn test_manual_intervals() {
        let mut host = ManualTimers::new();
        let h = host.start_interval(200).unwrap();
        assert!(host.interval_active());
        host.clear_interval(h);
        host.clear_interval(h);
        assert!(!host.interval_active());
    }
}
