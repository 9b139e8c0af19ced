//! Frame scheduling and the game driver
//!
//! `Game` owns the simulation state and both timers. The host calls
//! `on_frame` once per display refresh, `on_spawn_timer` on each spawn
//! interval and `on_click` for pointer input; every timer request and
//! cancellation goes back through a `TimerHost`.

use glam::Vec2;

use crate::platform::{FrameHandle, TimerHost};
use crate::renderer::{Surface, draw_frame, draw_game_over};
use crate::settings::GameConfig;
use crate::sim::{Command, GameState, Spawner, TickReport, tick};
use crate::ui::ReplayButton;

/// Frame delta used for the first frame of a run (60Hz)
pub const DEFAULT_FRAME_MS: f32 = 1000.0 / 60.0;

/// Owns the single outstanding per-refresh request
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the next frame unless one is already outstanding
    pub fn schedule(&mut self, host: &mut dyn TimerHost) {
        if self.pending.is_none() {
            self.pending = host.request_frame();
        }
    }

    /// The host delivered the outstanding frame
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Cancel the outstanding request, if any. Idempotent.
    pub fn stop(&mut self, host: &mut dyn TimerHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }
}

/// Result of one frame callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Tick ran and the next frame is scheduled
    Continue(TickReport),
    /// Tick ended the game; the overlay was drawn and timers are stopped
    Ended(TickReport),
    /// Frame arrived while the game was over; nothing ran
    Idle,
}

/// Result of a pointer click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Fired,
    Replayed,
    Ignored,
}

pub struct Game {
    pub state: GameState,
    frames: FrameScheduler,
    spawner: Spawner,
    last_time: Option<f64>,
}

impl Game {
    pub fn new(bounds: Vec2, config: GameConfig, seed: u64) -> Self {
        let spawner = Spawner::new(config.spawn_interval_ms);
        log::info!("New game: {}x{} seed {}", bounds.x, bounds.y, seed);
        Self {
            state: GameState::new(bounds, config, seed),
            frames: FrameScheduler::new(),
            spawner,
            last_time: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.frames.is_scheduled()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_running()
    }

    /// Begin the frame loop and the spawn timer
    pub fn start(&mut self, host: &mut dyn TimerHost) {
        self.last_time = None;
        self.frames.schedule(host);
        self.spawner.start(host);
    }

    /// Cancel both timers. Safe to call repeatedly.
    pub fn stop(&mut self, host: &mut dyn TimerHost) {
        self.frames.stop(host);
        self.spawner.stop(host);
    }

    /// Per-refresh callback. `time_ms` is the host's frame timestamp.
    pub fn on_frame<S: Surface + ?Sized>(
        &mut self,
        time_ms: f64,
        host: &mut dyn TimerHost,
        surface: &mut S,
    ) -> FrameOutcome {
        self.frames.fired();
        if !self.state.is_running() {
            return FrameOutcome::Idle;
        }

        let dt_ms = match self.last_time {
            Some(last) => (time_ms - last) as f32,
            None => DEFAULT_FRAME_MS,
        };
        self.last_time = Some(time_ms);

        let report = tick(&mut self.state, dt_ms);
        draw_frame(&self.state, surface);

        if report.game_over {
            self.stop(host);
            draw_game_over(&self.state, surface);
            FrameOutcome::Ended(report)
        } else {
            self.frames.schedule(host);
            FrameOutcome::Continue(report)
        }
    }

    /// Spawn interval elapsed
    pub fn on_spawn_timer(&mut self) {
        self.state.enqueue(Command::SpawnEnemy);
    }

    /// Pointer click at canvas coordinates `pos`
    pub fn on_click(&mut self, pos: Vec2, host: &mut dyn TimerHost) -> ClickOutcome {
        if self.state.is_running() {
            self.state.enqueue(Command::Fire { target: pos });
            return ClickOutcome::Fired;
        }
        if ReplayButton::for_bounds(self.state.bounds).hit(pos) {
            self.state.replay();
            self.start(host);
            return ClickOutcome::Replayed;
        }
        ClickOutcome::Ignored
    }
}
