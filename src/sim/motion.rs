//! Per-tick motion integration
//!
//! Every moving entity uses the same Euler step with an implicit timestep of
//! one frame: `pos += vel`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position and velocity of a moving circle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Advance one tick
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Scale velocity by `factor`, then advance one tick
    #[inline]
    pub fn damped_advance(&mut self, factor: f32) {
        self.vel *= factor;
        self.advance();
    }
}

/// Anything simulated with a body and a collision radius
pub trait Movable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn radius(&self) -> f32;

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    /// Run this entity's per-tick motion rule
    fn step(&mut self) {
        self.body_mut().advance();
    }
}
