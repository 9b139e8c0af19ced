//! One simulation tick
//!
//! Advances the game by exactly one frame. Pass order: drain queued
//! commands, player, particles, projectiles, enemies with collision scan,
//! hit resolution, then compaction of all three pools.

use super::collision::{fully_outside, resolve_hits, scan_contacts};
use super::motion::Movable;
use super::state::{Command, GamePhase, GameState};
use crate::consts::HIT_SCORE;

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Enemies spawned from queued spawn commands
    pub spawned: usize,
    /// Projectiles fired from queued clicks
    pub fired: usize,
    /// Scoring hits (one per enemy at most)
    pub hits: usize,
    /// Enemies removed by a hit
    pub destroyed: usize,
    /// Projectiles spent on an enemy that was already hit
    pub consumed: usize,
    pub particles_spawned: usize,
    /// Game ended during this tick
    pub game_over: bool,
}

/// Advance the game state by one frame. `dt_ms` is the wall-clock time
/// since the previous frame and only drives the smoothed transitions;
/// motion uses a fixed per-tick step.
pub fn tick(state: &mut GameState, dt_ms: f32) -> TickReport {
    let mut report = TickReport::default();

    if state.phase == GamePhase::GameOver {
        state.commands.clear();
        return report;
    }

    state.time_ticks += 1;

    while let Some(command) = state.commands.pop_front() {
        match command {
            Command::SpawnEnemy => {
                state.spawn_enemy();
                report.spawned += 1;
            }
            Command::Fire { target } => {
                report.fired += state.fire_spray(target);
            }
        }
    }

    state.player.update(dt_ms);

    for i in 0..state.particles.len() {
        if let Some(particle) = state.particles.get_mut(i) {
            particle.step();
            if particle.is_faded() {
                state.particles.mark_dead(i);
            }
        }
    }

    let bounds = state.bounds;
    for i in 0..state.projectiles.len() {
        if let Some(projectile) = state.projectiles.get_mut(i) {
            projectile.step();
            if fully_outside(projectile.pos(), projectile.radius, bounds) {
                state.projectiles.mark_dead(i);
            }
        }
    }

    for enemy in state.enemies.iter_mut() {
        enemy.step();
        enemy.update_shrink(dt_ms);
    }

    let scan = scan_contacts(&state.player, &state.enemies, &mut state.projectiles);

    for hit in &scan.hits {
        state.score += HIT_SCORE;
        report.particles_spawned += state.burst(hit.point, hit.radius, hit.color);
    }
    report.hits = scan.hits.len();
    report.consumed = scan.consumed;
    report.destroyed = resolve_hits(&mut state.enemies, &scan.hits, state.config.enemy_shrink_ms);

    if scan.player_contact.is_some() {
        state.trigger_game_over();
        report.game_over = true;
    }

    state.particles.compact();
    state.projectiles.compact();
    state.enemies.compact();
    state.enforce_particle_cap();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::GameConfig;
    use crate::sim::entities::{Color, Enemy, Particle, Projectile};
    use glam::Vec2;
    use proptest::prelude::*;

    fn config() -> GameConfig {
        GameConfig {
            enemy_shrink_ms: 0.0,
            ..GameConfig::default()
        }
    }

    fn state() -> GameState {
        GameState::new(Vec2::new(800.0, 600.0), config(), 12345)
    }

    /// Run ticks until `done` or the limit, returning how many ran
    fn run_until(state: &mut GameState, limit: usize, done: impl Fn(&TickReport) -> bool) -> usize {
        for n in 1..=limit {
            let report = tick(state, 16.0);
            if done(&report) {
                return n;
            }
        }
        limit
    }

    #[test]
    fn test_projectile_hit_shrinks_large_enemy() {
        let mut state = state();
        state.player.radius = 10.0;
        state
            .enemies
            .push(Enemy::new(Vec2::new(450.0, 300.0), Vec2::ZERO, 30.0, Color::enemy(90.0)));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, 300.0), Vec2::new(10.0, 0.0), 5.0));

        let ticks = run_until(&mut state, 10, |r| r.hits > 0);
        assert!(ticks < 10, "projectile never connected");

        assert_eq!(state.particles.len(), 60);
        assert!(state.particles.iter().all(|p| p.body.pos == Vec2::new(450.0, 300.0)));
        assert!(state.particles.iter().all(|p| p.color == Color::enemy(90.0)));
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies.get(0).unwrap().radius, 20.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_projectile_hit_destroys_small_enemy() {
        let mut state = state();
        state
            .enemies
            .push(Enemy::new(Vec2::new(460.0, 300.0), Vec2::ZERO, 20.0, Color::enemy(0.0)));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(400.0, 300.0), Vec2::new(10.0, 0.0), 5.0));

        let ticks = run_until(&mut state, 10, |r| r.hits > 0);
        assert!(ticks < 10);
        assert_eq!(state.particles.len(), 40);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_animated_shrink_settles_at_step() {
        let mut state = state();
        state.config.enemy_shrink_ms = 200.0;
        state
            .enemies
            .push(Enemy::new(Vec2::new(600.0, 300.0), Vec2::ZERO, 28.0, Color::enemy(0.0)));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(620.0, 300.0), Vec2::ZERO, 5.0));

        let report = tick(&mut state, 16.0);
        assert_eq!(report.hits, 1);
        let enemy = state.enemies.get(0).unwrap();
        assert_eq!(enemy.resting_radius(), 18.0);
        assert!(enemy.radius > 18.0);

        for _ in 0..20 {
            tick(&mut state, 16.0);
        }
        assert_eq!(state.enemies.get(0).unwrap().radius, 18.0);
    }

    #[test]
    fn test_double_hit_same_tick_counts_once() {
        let mut state = state();
        state
            .enemies
            .push(Enemy::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 25.0, Color::enemy(0.0)));
        for dy in [-10.0, 0.0, 10.0] {
            state
                .projectiles
                .push(Projectile::new(Vec2::new(100.0, 100.0 + dy), Vec2::ZERO, 5.0));
        }

        let report = tick(&mut state, 16.0);
        assert_eq!(report.hits, 1);
        assert_eq!(report.consumed, 2);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.get(0).unwrap().radius, 15.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_enemy_contact_ends_game() {
        let mut state = state();
        // Enemy heading at the player
        state
            .enemies
            .push(Enemy::new(Vec2::new(460.0, 300.0), Vec2::new(-6.0, 0.0), 20.0, Color::enemy(0.0)));
        // Bystander; a projectile is placed on it once the game is over
        state
            .enemies
            .push(Enemy::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 25.0, Color::enemy(0.0)));

        let ticks = run_until(&mut state, 20, |r| r.game_over);
        assert!(ticks < 20);
        assert_eq!(state.phase, GamePhase::GameOver);

        let enemy = state.enemies.get(0).unwrap();
        let gap = enemy.body.pos.distance(state.player.pos) - enemy.radius - state.player.radius;
        assert!(gap < CONTACT_THRESHOLD);

        state
            .projectiles
            .push(Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 5.0));
        let before = state.enemies.len();
        let report = tick(&mut state, 16.0);
        assert_eq!(report, TickReport::default());
        assert_eq!(state.enemies.len(), before);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_no_processing_after_contact_in_same_tick() {
        let mut state = state();
        // First enemy in pool order touches the player immediately
        state
            .enemies
            .push(Enemy::new(Vec2::new(425.0, 300.0), Vec2::ZERO, 20.0, Color::enemy(0.0)));
        state
            .enemies
            .push(Enemy::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 25.0, Color::enemy(0.0)));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 5.0));

        let report = tick(&mut state, 16.0);
        assert!(report.game_over);
        assert_eq!(report.hits, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.enemies.get(1).unwrap().radius, 25.0);
    }

    #[test]
    fn test_queued_commands_drain_in_order() {
        let mut state = state();
        state.enqueue(Command::SpawnEnemy);
        state.enqueue(Command::Fire {
            target: Vec2::new(700.0, 300.0),
        });
        state.enqueue(Command::SpawnEnemy);

        let report = tick(&mut state, 16.0);
        assert_eq!(report.spawned, 2);
        assert_eq!(report.fired, state.config.spray_count as usize);
        assert!(state.commands.is_empty());
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_replay_after_game_over() {
        let mut state = state();
        state
            .enemies
            .push(Enemy::new(Vec2::new(420.0, 300.0), Vec2::ZERO, 15.0, Color::enemy(0.0)));
        state.score = 3;
        assert!(tick(&mut state, 16.0).game_over);

        state.replay();
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        let report = tick(&mut state, 16.0);
        assert!(!report.game_over);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_particle_removed_once_alpha_negative() {
        let mut state = state();
        state
            .particles
            .push(Particle::new(Vec2::new(400.0, 100.0), Vec2::new(1.0, 0.0), 4.0, Color::WHITE));

        let mut last_alpha = 1.0_f32;
        let mut ticks = 0;
        while let Some(p) = state.particles.get(0) {
            assert!(p.alpha >= 0.0, "faded particle survived compaction");
            assert!(p.alpha <= last_alpha);
            if ticks > 0 {
                assert!((last_alpha - p.alpha - PARTICLE_FADE).abs() < 1e-4);
            }
            last_alpha = p.alpha;
            tick(&mut state, 16.0);
            ticks += 1;
            assert!(ticks <= 102, "particle never expired");
        }
        // Alpha starts at 1 and loses 0.01 per tick
        assert!((100..=102).contains(&ticks));
    }

    proptest! {
        #[test]
        fn offscreen_projectiles_are_removed(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 1.0f32..20.0,
        ) {
            let mut state = state();
            state.player.pos = Vec2::new(-500.0, -500.0);
            let vel = crate::direction(angle) * speed;
            state.projectiles.push(Projectile::new(Vec2::new(x, y), vel, 5.0));

            for _ in 0..2000 {
                let before = state.projectiles.get(0).map(|p| p.body.pos);
                tick(&mut state, 16.0);
                match (before, state.projectiles.get(0)) {
                    (Some(_), Some(p)) => {
                        prop_assert!(!fully_outside(p.body.pos, p.radius, state.bounds));
                    }
                    (Some(prev), None) => {
                        prop_assert!(fully_outside(prev + vel, 5.0, state.bounds));
                        break;
                    }
                    _ => break,
                }
            }
            prop_assert!(state.projectiles.is_empty());
        }

        #[test]
        fn pools_hold_no_dead_entries_after_tick(
            seed in any::<u64>(),
            spawns in 1usize..20,
            clicks in proptest::collection::vec((0.0f32..800.0, 0.0f32..600.0), 0..5),
        ) {
            let mut state = GameState::new(Vec2::new(800.0, 600.0), config(), seed);
            for _ in 0..spawns {
                state.enqueue(Command::SpawnEnemy);
            }
            for (x, y) in clicks {
                state.enqueue(Command::Fire { target: Vec2::new(x, y) });
            }
            let mut last_score = 0;
            for _ in 0..200 {
                let report = tick(&mut state, 16.0);
                prop_assert_eq!(state.enemies.dead_count(), 0);
                prop_assert_eq!(state.projectiles.dead_count(), 0);
                prop_assert_eq!(state.particles.dead_count(), 0);
                prop_assert!(state.enemies.iter().all(|e| e.radius > 0.0));
                prop_assert!(state.particles.iter().all(|p| p.alpha >= 0.0));
                prop_assert_eq!(state.score, last_score + report.hits as u64);
                last_score = state.score;
                if report.game_over {
                    break;
                }
            }
            // Frozen once over
            if state.phase == GamePhase::GameOver {
                let score = state.score;
                state.enqueue(Command::SpawnEnemy);
                tick(&mut state, 16.0);
                prop_assert_eq!(state.score, score);
            }
        }
    }
}
