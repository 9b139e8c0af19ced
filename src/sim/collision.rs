//! Collision detection and hit resolution
//!
//! Everything in the arena is a circle. Two circles touch when the gap
//! between their edges drops below `CONTACT_THRESHOLD`; coincident centres
//! fall out of the same comparison.

use glam::Vec2;

use super::entities::{Color, Enemy, Player, Projectile};
use super::motion::Movable;
use super::pool::Pool;
use crate::consts::*;

/// Gap between the edges of two circles (negative when overlapping)
#[inline]
pub fn edge_gap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> f32 {
    a.distance(b) - a_radius - b_radius
}

/// Check whether two circles are in contact
#[inline]
pub fn circles_touch(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    edge_gap(a, a_radius, b, b_radius) < CONTACT_THRESHOLD
}

/// Check whether a circle lies entirely outside the `[0, w] x [0, h]` rectangle
#[inline]
pub fn fully_outside(pos: Vec2, radius: f32, bounds: Vec2) -> bool {
    pos.x + radius < 0.0
        || pos.x - radius > bounds.x
        || pos.y + radius < 0.0
        || pos.y - radius > bounds.y
}

/// A projectile/enemy pair that counted this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub enemy: usize,
    pub projectile: usize,
    /// Enemy centre at the moment of impact
    pub point: Vec2,
    /// Enemy radius at the moment of impact
    pub radius: f32,
    pub color: Color,
}

/// Result of scanning every enemy for contacts
#[derive(Debug, Clone, Default)]
pub struct ContactScan {
    /// At most one hit per enemy, in enemy pool order
    pub hits: Vec<Hit>,
    /// Projectiles consumed by an enemy that was already hit this tick
    pub consumed: usize,
    /// Enemy that reached the player, if any; scanning stops there
    pub player_contact: Option<usize>,
}

/// Scan enemies in pool order against the player and live projectiles.
///
/// For each enemy the player is checked first; a contact ends the scan. The
/// first live projectile (in pool order) touching an enemy wins the hit;
/// any other projectile touching the same enemy is consumed without scoring.
/// Every touching projectile is flagged dead, so one projectile never hits
/// two enemies.
pub fn scan_contacts(
    player: &Player,
    enemies: &Pool<Enemy>,
    projectiles: &mut Pool<Projectile>,
) -> ContactScan {
    let mut scan = ContactScan::default();

    for (ei, enemy) in enemies.iter_alive() {
        let pos = enemy.pos();
        if circles_touch(player.pos, player.radius, pos, enemy.radius) {
            scan.player_contact = Some(ei);
            break;
        }

        let mut winner: Option<usize> = None;
        for pi in 0..projectiles.len() {
            if projectiles.is_dead(pi) {
                continue;
            }
            let Some(projectile) = projectiles.get(pi) else {
                continue;
            };
            if !circles_touch(projectile.pos(), projectile.radius, pos, enemy.radius) {
                continue;
            }
            projectiles.mark_dead(pi);
            if winner.is_none() {
                winner = Some(pi);
            } else {
                scan.consumed += 1;
            }
        }

        if let Some(pi) = winner {
            scan.hits.push(Hit {
                enemy: ei,
                projectile: pi,
                point: pos,
                radius: enemy.radius,
                color: enemy.color,
            });
        }
    }

    scan
}

/// Apply shrink/destroy to every hit enemy. Returns the number destroyed.
pub fn resolve_hits(enemies: &mut Pool<Enemy>, hits: &[Hit], shrink_ms: f32) -> usize {
    let mut destroyed = 0;
    for hit in hits {
        let Some(enemy) = enemies.get_mut(hit.enemy) else {
            continue;
        };
        if enemy.is_lethal_hit() {
            enemies.mark_dead(hit.enemy);
            destroyed += 1;
        } else {
            enemy.shrink(shrink_ms);
        }
    }
    destroyed
}
