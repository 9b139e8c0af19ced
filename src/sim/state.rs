//! Game state and the commands that mutate it between ticks
//!
//! `GameState` is the one authoritative aggregate: player, the three entity
//! pools, score, phase and the seeded RNG. Timer callbacks never touch the
//! pools directly; they push a `Command` that the next tick drains.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{Color, Enemy, Particle, Player, Projectile};
use super::pool::Pool;
use super::spawner::spawn_enemy;
use crate::consts::*;
use crate::settings::GameConfig;
use crate::{angle_between, direction};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    GameOver,
}

/// Deferred mutation, applied at the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Spawn timer fired
    SpawnEnemy,
    /// Player clicked while running
    Fire { target: Vec2 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Logical canvas size (fixed for the session)
    pub bounds: Vec2,
    pub config: GameConfig,
    pub player: Player,
    pub projectiles: Pool<Projectile>,
    pub enemies: Pool<Enemy>,
    pub particles: Pool<Particle>,
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter (not reset on replay)
    pub time_ticks: u64,
    /// Pending commands, drained in arrival order
    pub commands: VecDeque<Command>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game on a `bounds`-sized canvas
    pub fn new(bounds: Vec2, config: GameConfig, seed: u64) -> Self {
        let center = bounds / 2.0;
        Self {
            seed,
            bounds,
            player: Player::new(center, config.player_radius),
            config,
            projectiles: Pool::new(),
            enemies: Pool::new(),
            particles: Pool::new(),
            score: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
            commands: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds / 2.0
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Queue a command for the next tick. Ignored once the game is over.
    pub fn enqueue(&mut self, command: Command) {
        if self.is_running() {
            self.commands.push_back(command);
        }
    }

    /// Spawn one enemy aimed at the player's current position
    pub fn spawn_enemy(&mut self) {
        let enemy = spawn_enemy(&mut self.rng, self.bounds, self.player.pos);
        log::debug!(
            "Enemy spawned at ({:.0}, {:.0}) r={:.1}",
            enemy.body.pos.x,
            enemy.body.pos.y,
            enemy.radius
        );
        self.enemies.push(enemy);
    }

    /// Fire a fan of projectiles from the player toward `target`.
    /// Returns the number fired.
    pub fn fire_spray(&mut self, target: Vec2) -> usize {
        let origin = self.player.pos;
        let base = angle_between(origin, target);
        let count = self.config.spray_count.max(1);
        let spread = self.config.spray_spread;
        let jitter = self.config.spray_jitter;

        for i in 0..count {
            let offset = if count == 1 {
                0.0
            } else {
                -spread + 2.0 * spread * (i as f32 / (count - 1) as f32)
            };
            let noise = if jitter > 0.0 {
                self.rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            let vel = direction(base + offset + noise) * self.config.projectile_speed;
            self.projectiles
                .push(Projectile::new(origin, vel, self.config.projectile_radius));
        }

        if self.config.player_glide_ms > 0.0 {
            self.player.glide_to(target, self.config.player_glide_ms);
        }

        count as usize
    }

    /// Emit the kill burst for an enemy of `radius` at `point`.
    /// Returns the number of particles created.
    pub fn burst(&mut self, point: Vec2, radius: f32, color: Color) -> usize {
        let count = (radius * PARTICLES_PER_RADIUS).ceil().max(0.0) as usize;
        for _ in 0..count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = self.rng.random::<f32>() * PARTICLE_MAX_SPEED;
            let size = self.rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
            self.particles
                .push(Particle::new(point, direction(angle) * speed, size, color));
        }
        count
    }

    /// Drop the oldest particles beyond the configured cap
    pub fn enforce_particle_cap(&mut self) {
        let cap = self.config.max_particles;
        if cap > 0 && self.particles.len() > cap {
            self.particles.evict_oldest(self.particles.len() - cap);
        }
    }

    /// Enter the terminal phase; pending commands are discarded
    pub fn trigger_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.commands.clear();
        log::info!(
            "Game over: score {} after {} ticks",
            self.score,
            self.time_ticks
        );
    }

    /// Start a fresh round: empty pools, centred player, zero score
    pub fn replay(&mut self) {
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.commands.clear();
        let center = self.center();
        self.player.reset(center);
        self.score = 0;
        self.phase = GamePhase::Running;
        log::info!("Replay started");
    }
}
