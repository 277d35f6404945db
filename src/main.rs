//! Retro Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use retro_racer::renderer::RenderState;
    use retro_racer::{AppPhase, Host, Key};

    /// Game instance holding all state
    struct Game {
        host: Host,
        render_state: Option<RenderState>,
        /// Phase the DOM overlays currently show
        shown_phase: Option<AppPhase>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                host: Host::new(seed),
                render_state: None,
                shown_phase: None,
            }
        }

        /// Advance one frame and draw it. Without a surface the frame is skipped.
        fn update(&mut self) {
            let Game {
                host, render_state, ..
            } = self;
            if let Some(render_state) = render_state {
                host.frame(render_state);
            }
        }

        /// Update HUD text and phase overlays in the DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let race = self.host.race();
            let hud = retro_racer::renderer::Hud {
                speed: race.speed,
                distance: race.distance,
                lives: race.lives,
                score: race.score,
            };
            if let Some(el) = document.get_element_by_id("hud-speed") {
                el.set_text_content(Some(&hud.speed_label()));
            }
            if let Some(el) = document.get_element_by_id("hud-dist") {
                el.set_text_content(Some(&hud.distance_label()));
            }

            let phase = self.host.phase();
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            for (id, visible) in [
                ("boot", phase == AppPhase::Boot),
                ("menu", phase == AppPhase::Menu),
                ("hud", phase == AppPhase::Playing),
                ("game-over", phase == AppPhase::GameOver),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = if visible {
                        el.class_list().remove_1("hidden")
                    } else {
                        el.class_list().add_1("hidden")
                    };
                }
            }

            if let Some(stats) = self.host.last_stats() {
                if let Some(el) = document.get_element_by_id("go-distance") {
                    el.set_text_content(Some(&stats.meters().to_string()));
                }
                if let Some(el) = document.get_element_by_id("go-cause") {
                    el.set_text_content(Some(&stats.cause_of_death));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Retro Racer starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas element");
            return;
        };

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::default(),
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let field = {
                            let g = game.borrow();
                            let tuning = &g.host.race().tuning;
                            (tuning.canvas_width, tuning.canvas_height)
                        };
                        match RenderState::new(surface, &adapter, width, height, field).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Retro Racer running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_key_name(&event.key());
                if key != Key::Other {
                    event.prevent_default();
                }
                game.borrow_mut().host.key_down(key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start sets the swipe baseline
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().host.touch_start(touch.client_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move steps lanes
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().host.touch_move(touch.client_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end clears the baseline
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().host.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start and retry buttons on the overlays
    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "retry-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().host.confirm();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use retro_racer::renderer::TextGrid;
    use retro_racer::sim::{EntityKind, RaceState};
    use retro_racer::{AppPhase, Host, Key, Tuning};

    /// Give up on a run that survives this long
    const MAX_FRAMES: u64 = 100_000;
    /// How far ahead of the bumper the autopilot looks for traffic
    const LOOKAHEAD: f32 = 260.0;

    /// Usage: `retro-racer [seed] [tuning.json]`
    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5eed);
        let tuning = match args.next() {
            Some(path) => load_tuning(&path),
            None => Tuning::default(),
        };

        let mut host = Host::with_tuning(tuning, seed);
        let mut grid = TextGrid::new(40, 30);
        host.confirm();
        host.confirm();

        let mut frames = 0;
        while host.phase() == AppPhase::Playing && frames < MAX_FRAMES {
            let want = autopilot_lane(host.race(), host.input().desired_lane());
            let have = host.input().desired_lane();
            if want < have {
                host.key_down(Key::Left);
            } else if want > have {
                host.key_down(Key::Right);
            }
            host.frame(&mut grid);
            frames += 1;
        }

        println!("{}", grid.to_text());
        match host.last_stats() {
            Some(stats) => match serde_json::to_string_pretty(stats) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("could not encode stats: {}", e),
            },
            None => log::warn!("run still going after {} frames", frames),
        }
    }

    fn load_tuning(path: &str) -> Tuning {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not read {}: {}, using defaults", path, e);
                return Tuning::default();
            }
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Tuning::default()
            }
        }
    }

    /// Stay put unless traffic is close in this lane; then take the nearest
    /// clear lane, preferring one with a heart.
    fn autopilot_lane(race: &RaceState, current: usize) -> usize {
        let player = &race.player;
        let near = |lane: usize, kind: EntityKind| {
            race.entities.iter().any(|e| {
                e.kind == kind
                    && e.lane == Some(lane)
                    && e.max().y > player.pos.y - LOOKAHEAD
                    && e.pos.y < player.max().y
            })
        };

        let lanes = race.tuning.lane_count;
        if let Some(lane) = (0..lanes).find(|&l| near(l, EntityKind::Heart) && !near(l, EntityKind::Enemy)) {
            if lane.abs_diff(current) <= 1 {
                return lane;
            }
        }
        if !near(current, EntityKind::Enemy) {
            return current;
        }
        (0..lanes)
            .filter(|&l| !near(l, EntityKind::Enemy))
            .min_by_key(|&l| l.abs_diff(current))
            .unwrap_or(current)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Retro Racer (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
