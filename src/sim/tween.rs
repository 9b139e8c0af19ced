//! Time-boxed interpolation
//!
//! Used for the click-to-move glide and the enemy shrink animation. A tween
//! is advanced by frame time and sampled once per tick; it never schedules
//! anything on its own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Values a tween can blend between
pub trait Lerp: Copy {
    fn lerp_to(self, target: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

/// Interpolation from `start` to `target` over `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween<T> {
    pub start: T,
    pub target: T,
    pub duration_ms: f32,
    pub elapsed_ms: f32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(start: T, target: T, duration_ms: f32) -> Self {
        Self {
            start,
            target,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current value (ease-out quad)
    pub fn value(&self) -> T {
        let t = self.progress();
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        if t >= 1.0 {
            self.target
        } else {
            self.start.lerp_to(self.target, eased)
        }
    }

    /// Advance by `dt_ms` and return the sampled value
    pub fn step(&mut self, dt_ms: f32) -> T {
        self.elapsed_ms += dt_ms.max(0.0);
        self.value()
    }
}
