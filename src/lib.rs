//! Spray Shooter - a canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (motion, entity pools, spawning, collisions, game state)
//! - `scheduler`: Frame/spawn timer lifecycle and the per-frame driver
//! - `renderer`: Drawing onto a 2D surface (canvas on the web)
//! - `platform`: Browser timer abstraction
//! - `settings`: Data-driven game tuning
//! - `ui`: HUD layout and the replay button

pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod ui;

pub use scheduler::{ClickOutcome, FrameOutcome, FrameScheduler, Game};
pub use settings::{ConfigError, GameConfig};

use glam::Vec2;

/// Game rule constants
pub mod consts {
    /// Gap (in pixels) below which two circles count as touching
    pub const CONTACT_THRESHOLD: f32 = 1.0;

    /// Enemies hit at or below this radius are destroyed instead of shrunk
    pub const ENEMY_DESTROY_RADIUS: f32 = 20.0;
    /// Radius lost by an enemy on a non-lethal hit
    pub const ENEMY_SHRINK_STEP: f32 = 10.0;
    /// Enemy radius range [min, max)
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    /// Enemy speed range [min, max), pixels per tick
    pub const ENEMY_MIN_SPEED: f32 = 5.0;
    pub const ENEMY_MAX_SPEED: f32 = 6.5;
    /// Enemy colour saturation/lightness (hue is random)
    pub const ENEMY_SATURATION: f32 = 50.0;
    pub const ENEMY_LIGHTNESS: f32 = 50.0;

    /// Particle velocity damping per tick
    pub const PARTICLE_FRICTION: f32 = 0.99;
    /// Particle opacity lost per tick
    pub const PARTICLE_FADE: f32 = 0.01;
    /// Particle radius range [min, max)
    pub const PARTICLE_MIN_RADIUS: f32 = 3.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 6.0;
    /// Upper bound on particle burst speed, pixels per tick
    pub const PARTICLE_MAX_SPEED: f32 = 6.0;
    /// Particles spawned per unit of enemy radius
    pub const PARTICLES_PER_RADIUS: f32 = 2.0;

    /// Score awarded per registered hit
    pub const HIT_SCORE: u64 = 1;
}

/// Unit vector pointing along `angle` (radians, y down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_direction_axes() {
        assert!((direction(0.0) - Vec2::X).length() < 1e-6);
        // y grows downward, so +π/2 points down the screen
        assert!((direction(FRAC_PI_2) - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_angle_between() {
        let a = angle_between(Vec2::new(400.0, 300.0), Vec2::new(400.0, 600.0));
        assert!((a - FRAC_PI_2).abs() < 1e-6);
    }
}
