//! Enemy spawning
//!
//! The spawn timer runs on its own host interval, independent of the frame
//! loop. Its callback only enqueues a spawn command; the enemy is built at
//! the start of the next tick.

use glam::Vec2;
use rand::Rng;

use super::entities::{Color, Enemy};
use crate::consts::*;
use crate::direction;
use crate::platform::{IntervalHandle, TimerHost};

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Left,
        SpawnEdge::Right,
        SpawnEdge::Top,
        SpawnEdge::Bottom,
    ];

    /// Spawn point just outside this edge, `offset` along the edge
    pub fn spawn_point(self, bounds: Vec2, offset: f32, radius: f32) -> Vec2 {
        match self {
            SpawnEdge::Left => Vec2::new(-radius, offset),
            SpawnEdge::Right => Vec2::new(bounds.x + radius, offset),
            SpawnEdge::Top => Vec2::new(offset, -radius),
            SpawnEdge::Bottom => Vec2::new(offset, bounds.y + radius),
        }
    }

    /// Length of the edge (the axis the spawn point is randomized along)
    pub fn extent(self, bounds: Vec2) -> f32 {
        match self {
            SpawnEdge::Left | SpawnEdge::Right => bounds.y,
            SpawnEdge::Top | SpawnEdge::Bottom => bounds.x,
        }
    }
}

/// Build one enemy entering from a random edge and aimed at `target`
pub fn spawn_enemy<R: Rng>(rng: &mut R, bounds: Vec2, target: Vec2) -> Enemy {
    let radius = rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);
    let edge = SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())];
    let offset = rng.random::<f32>() * edge.extent(bounds);
    let pos = edge.spawn_point(bounds, offset, radius);

    let speed = rng.random_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
    let angle = crate::angle_between(pos, target);
    let vel = direction(angle) * speed;

    let hue = rng.random::<f32>() * 360.0;
    Enemy::new(pos, vel, radius, Color::enemy(hue))
}

/// Lifecycle of the repeating spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    pub interval_ms: u32,
    timer: Option<IntervalHandle>,
}

impl Spawner {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            timer: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start the interval; does nothing if already running
    pub fn start(&mut self, host: &mut dyn TimerHost) {
        if self.timer.is_some() {
            return;
        }
        self.timer = host.start_interval(self.interval_ms);
        if self.timer.is_none() {
            log::warn!("Spawn timer could not be started");
        }
    }

    /// Cancel the interval; safe to call repeatedly
    pub fn stop(&mut self, host: &mut dyn TimerHost) {
        if let Some(handle) = self.timer.take() {
            host.clear_interval(handle);
        }
    }
}
