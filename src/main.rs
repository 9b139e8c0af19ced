//! Spray Shooter entry point
//!
//! On the web this wires the canvas, timers and click input to `Game`.
//! Natively it plays a short headless round against a recording surface.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, MouseEvent, Window};

    use spray_shooter::platform::web::WebTimers;
    use spray_shooter::renderer::CanvasSurface;
    use spray_shooter::scheduler::{ClickOutcome, FrameOutcome};
    use spray_shooter::{Game, GameConfig};

    const SERVICE_WORKER_URL: &str = "./sw.js";

    struct App {
        game: Game,
        timers: WebTimers,
        surface: CanvasSurface,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Spray Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas fills the viewport; size is fixed for the session
        let width = viewport_dimension(window.inner_width());
        let height = viewport_dimension(window.inner_height());
        canvas.set_width(width);
        canvas.set_height(height);

        let surface = CanvasSurface::new(&canvas).expect("2d context unavailable");
        let config = GameConfig::load();
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let bounds = Vec2::new(width as f32, height as f32);

        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let timers = WebTimers::new(
                window.clone(),
                frame_callback(weak.clone()),
                spawn_callback(weak.clone()),
            );
            RefCell::new(App {
                game: Game::new(bounds, config, seed),
                timers,
                surface,
            })
        });

        {
            let mut app = app.borrow_mut();
            let App { game, timers, .. } = &mut *app;
            game.start(timers);
        }

        // The click listener holds the only strong reference and is never
        // removed, so the app lives for the whole page
        setup_click_handler(&canvas, app);
        register_service_worker(&window);

        log::info!("Spray Shooter running!");
    }

    fn viewport_dimension(value: Result<JsValue, JsValue>) -> u32 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(1.0) as u32
    }

    fn frame_callback(app: Weak<RefCell<App>>) -> Closure<dyn FnMut(f64)> {
        Closure::new(move |time: f64| {
            let Some(app) = app.upgrade() else {
                return;
            };
            let mut app = app.borrow_mut();
            let App {
                game,
                timers,
                surface,
            } = &mut *app;
            if let FrameOutcome::Ended(report) = game.on_frame(time, timers, surface) {
                log::debug!("Final tick: {:?}", report);
            }
        })
    }

    fn spawn_callback(app: Weak<RefCell<App>>) -> Closure<dyn FnMut()> {
        Closure::new(move || {
            if let Some(app) = app.upgrade() {
                app.borrow_mut().game.on_spawn_timer();
            }
        })
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            let mut app = app.borrow_mut();
            let App { game, timers, .. } = &mut *app;
            if game.on_click(pos, timers) == ClickOutcome::Replayed {
                log::info!("Replay from click at ({}, {})", pos.x, pos.y);
            }
        });
        if let Err(e) =
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to register click handler: {:?}", e);
        }
        closure.forget();
    }

    /// Offline caching is optional; failure only gets logged
    fn register_service_worker(window: &Window) {
        let promise = window
            .navigator()
            .service_worker()
            .register(SERVICE_WORKER_URL);
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => log::info!("Service worker registered"),
                Err(e) => log::warn!("Service worker registration failed: {:?}", e),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spray Shooter (native) starting...");
    log::info!("Native mode runs a headless round - build for wasm32 to play");

    let summary = headless_round(42, 3_600);
    println!(
        "Headless round: {} ticks, score {}, {} draw calls in the last frame{}",
        summary.ticks,
        summary.score,
        summary.last_frame_calls,
        if summary.game_over { ", game over" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
struct RoundSummary {
    ticks: u64,
    score: u64,
    game_over: bool,
    last_frame_calls: usize,
}

/// Drive `Game` with hand-fired timers: a 60Hz frame clock, the spawn
/// interval at its configured period and a click at the oldest enemy
/// every half second.
#[cfg(not(target_arch = "wasm32"))]
fn headless_round(seed: u64, max_frames: u32) -> RoundSummary {
    use glam::Vec2;
    use spray_shooter::platform::ManualTimers;
    use spray_shooter::renderer::RecordingSurface;
    use spray_shooter::scheduler::{DEFAULT_FRAME_MS, FrameOutcome};
    use spray_shooter::{Game, GameConfig};

    let bounds = Vec2::new(800.0, 600.0);
    let config = GameConfig::default();
    let spawn_every = config.spawn_interval_ms as f64;
    let mut game = Game::new(bounds, config, seed);
    let mut host = ManualTimers::new();
    let mut surface = RecordingSurface::new(bounds);

    game.start(&mut host);

    let mut now = 0.0_f64;
    let mut next_spawn = spawn_every;
    let mut game_over = false;
    for frame in 0..max_frames {
        if host.take_frame().is_none() {
            break;
        }
        now += DEFAULT_FRAME_MS as f64;

        while host.interval_active() && now >= next_spawn {
            game.on_spawn_timer();
            next_spawn += spawn_every;
        }
        if frame % 30 == 0 {
            if let Some(target) = game.state.enemies.iter().next().map(|e| e.body.pos) {
                game.on_click(target, &mut host);
            }
        }

        surface.clear();
        if let FrameOutcome::Ended(_) = game.on_frame(now, &mut host, &mut surface) {
            game_over = true;
            break;
        }
    }

    RoundSummary {
        ticks: game.state.time_ticks,
        score: game.state.score,
        game_over,
        last_frame_calls: surface.calls.len(),
    }
}
