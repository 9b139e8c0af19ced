//! Simulated entities: the player, projectiles, enemies and particles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Body, Movable};
use super::tween::Tween;
use crate::consts::*;

/// Fill colour of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    Hsl { hue: f32, saturation: f32, lightness: f32 },
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba { r, g, b, a }
    }

    /// Enemy palette: random hue, fixed saturation/lightness
    pub fn enemy(hue: f32) -> Self {
        Color::Hsl {
            hue,
            saturation: ENEMY_SATURATION,
            lightness: ENEMY_LIGHTNESS,
        }
    }

    /// CSS colour string for the canvas fill style
    pub fn css(&self) -> String {
        match *self {
            Color::Rgba { r, g, b, a } if a >= 1.0 => format!("rgb({r}, {g}, {b})"),
            Color::Rgba { r, g, b, a } => format!("rgba({r}, {g}, {b}, {a})"),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => format!("hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

/// The player's avatar (singleton)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Click-to-move glide in progress
    #[serde(skip)]
    pub glide: Option<Tween<Vec2>>,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            color: Color::WHITE,
            glide: None,
        }
    }

    /// Start gliding toward `target`; a zero duration jumps immediately
    pub fn glide_to(&mut self, target: Vec2, duration_ms: f32) {
        if duration_ms <= 0.0 {
            self.pos = target;
            self.glide = None;
        } else {
            self.glide = Some(Tween::new(self.pos, target, duration_ms));
        }
    }

    /// Sample the glide for this tick
    pub fn update(&mut self, dt_ms: f32) {
        if let Some(glide) = self.glide.as_mut() {
            self.pos = glide.step(dt_ms);
            if glide.is_finished() {
                self.glide = None;
            }
        }
    }

    /// Put the player back at `center`, cancelling any glide
    pub fn reset(&mut self, center: Vec2) {
        self.pos = center;
        self.glide = None;
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub radius: f32,
    pub color: Color,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, vel),
            radius,
            color: Color::WHITE,
        }
    }
}

impl Movable for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A hostile circle flying toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    /// Current (drawn and collided) radius
    pub radius: f32,
    pub color: Color,
    /// Shrink animation in progress
    #[serde(skip)]
    pub shrink: Option<Tween<f32>>,
}

impl Enemy {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            body: Body::new(pos, vel),
            radius,
            color,
            shrink: None,
        }
    }

    /// Radius the enemy will settle at once any shrink animation ends
    pub fn resting_radius(&self) -> f32 {
        self.shrink.map(|t| t.target).unwrap_or(self.radius)
    }

    /// Whether a hit right now would destroy this enemy
    pub fn is_lethal_hit(&self) -> bool {
        self.resting_radius() <= ENEMY_DESTROY_RADIUS
    }

    /// Lose `ENEMY_SHRINK_STEP` of radius, animated over `duration_ms`
    pub fn shrink(&mut self, duration_ms: f32) {
        let target = self.resting_radius() - ENEMY_SHRINK_STEP;
        if duration_ms <= 0.0 {
            self.radius = target;
            self.shrink = None;
        } else {
            self.shrink = Some(Tween::new(self.radius, target, duration_ms));
        }
    }

    /// Sample the shrink animation for this tick
    pub fn update_shrink(&mut self, dt_ms: f32) {
        if let Some(shrink) = self.shrink.as_mut() {
            self.radius = shrink.step(dt_ms);
            if shrink.is_finished() {
                self.shrink = None;
            }
        }
    }
}

impl Movable for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A fading spark from an enemy hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub radius: f32,
    pub color: Color,
    /// Opacity, starts at 1 and only decreases
    pub alpha: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            body: Body::new(pos, vel),
            radius,
            color,
            alpha: 1.0,
        }
    }

    pub fn is_faded(&self) -> bool {
        self.alpha < 0.0
    }
}

impl Movable for Particle {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn radius(&self) -> f32 {
        self.radius
    }

    fn step(&mut self) {
        self.body.damped_advance(PARTICLE_FRICTION);
        self.alpha -= PARTICLE_FADE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::WHITE.css(), "rgb(255, 255, 255)");
        assert_eq!(Color::rgba(0, 0, 0, 0.1).css(), "rgba(0, 0, 0, 0.1)");
        assert_eq!(Color::enemy(120.0).css(), "hsl(120, 50%, 50%)");
    }

    #[test]
    fn test_particle_step_fades_and_damps() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(2.0, 0.0), 4.0, Color::WHITE);
        p.step();
        assert!((p.alpha - 0.99).abs() < 1e-6);
        assert!((p.body.vel.x - 1.98).abs() < 1e-6);
        assert!((p.body.pos.x - 1.98).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_instant_shrink() {
        let mut e = Enemy::new(Vec2::ZERO, Vec2::ZERO, 28.0, Color::enemy(0.0));
        assert!(!e.is_lethal_hit());
        e.shrink(0.0);
        assert_eq!(e.radius, 18.0);
        assert!(e.is_lethal_hit());
    }

    #[test]
    fn test_enemy_animated_shrink_uses_resting_radius() {
        let mut e = Enemy::new(Vec2::ZERO, Vec2::ZERO, 29.0, Color::enemy(0.0));
        e.shrink(200.0);
        assert_eq!(e.radius, 29.0);
        assert_eq!(e.resting_radius(), 19.0);
        assert!(e.is_lethal_hit());
        for _ in 0..20 {
            e.update_shrink(16.0);
        }
        assert_eq!(e.radius, 19.0);
        assert!(e.shrink.is_none());
    }

    #[test]
    fn test_player_glide() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), 10.0);
        player.glide_to(Vec2::new(200.0, 100.0), 100.0);
        player.update(50.0);
        assert!(player.pos.x > 100.0 && player.pos.x < 200.0);
        player.update(50.0);
        assert_eq!(player.pos, Vec2::new(200.0, 100.0));
        assert!(player.glide.is_none());
    }

    proptest! {
        #[test]
        fn particle_alpha_and_speed_only_decay(
            vx in -6.0f32..6.0,
            vy in -6.0f32..6.0,
            steps in 1usize..150,
        ) {
            let mut p = Particle::new(Vec2::ZERO, Vec2::new(vx, vy), 4.0, Color::WHITE);
            for _ in 0..steps {
                let (alpha, speed) = (p.alpha, p.body.vel.length());
                p.step();
                prop_assert!(p.alpha < alpha);
                prop_assert!(p.body.vel.length() <= speed);
            }
        }
    }
}
