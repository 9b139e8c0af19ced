//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick per display refresh, fixed per-tick motion step
//! - Seeded RNG only
//! - Stable iteration order (pool order)

pub mod collision;
pub mod entities;
pub mod motion;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tween;

pub use collision::{ContactScan, Hit, circles_touch, fully_outside, resolve_hits, scan_contacts};
pub use entities::{Color, Enemy, Particle, Player, Projectile};
pub use motion::{Body, Movable};
pub use pool::Pool;
pub use spawner::{SpawnEdge, Spawner, spawn_enemy};
pub use state::{Command, GamePhase, GameState};
pub use tick::{TickReport, tick};
pub use tween::Tween;
