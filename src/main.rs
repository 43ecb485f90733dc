//! Gapwing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use gapwing::Tuning;
    use gapwing::audio::AudioManager;
    use gapwing::platform::assets::manifest;
    use gapwing::platform::input::activate;
    use gapwing::platform::web::{CanvasRenderer, ImageLoader, SpriteSheet};
    use gapwing::platform::{Activation, AssetLoader, HostCommand, command_for_key};
    use gapwing::renderer::draw_scene;
    use gapwing::sim::{Autopilot, Game};

    /// Game instance holding all state
    struct App {
        game: Game,
        renderer: CanvasRenderer,
        audio: AudioManager,
        autopilot: Option<Autopilot>,
    }

    impl App {
        /// Simulate one frame, then draw it
        fn frame(&mut self) {
            if let Some(bot) = self.autopilot.as_mut() {
                if bot.wants_flap(&self.game) {
                    self.game.handle_input(&mut self.audio);
                }
            }
            self.game.tick(&mut self.audio);
            draw_scene(&self.game, &mut self.renderer);
        }

        fn activate(&mut self, source: Activation) {
            self.audio.resume();
            activate(&mut self.game, source, &mut self.audio);
        }

        fn toggle_demo(&mut self) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::default()),
            };
            log::info!("Demo mode: {}", self.autopilot.is_some());
        }

        fn toggle_mute(&mut self) {
            let muted = self.audio.toggle_muted();
            log::info!("Muted: {}", muted);
        }
    }

    /// Tuning overrides from the canvas `data-tuning` attribute
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gapwing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = load_tuning(&canvas);
        canvas.set_width(tuning.world_width as u32);
        canvas.set_height(tuning.world_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = match Game::with_tuning(tuning, seed) {
            Ok(game) => game,
            Err(e) => {
                log::warn!("Falling back to default tuning: {}", e);
                Game::new(seed)
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let sheet = SpriteSheet::new();
        let app = Rc::new(RefCell::new(App {
            game,
            renderer: CanvasRenderer::new(ctx, sheet.clone()),
            audio: AudioManager::new(),
            autopilot: None,
        }));

        setup_input_handlers(&canvas, app.clone());

        // Nothing ticks until every sprite is ready
        let mut loader = ImageLoader::new(sheet);
        loader.load_all(
            manifest(),
            Box::new(move || {
                log::info!("Assets loaded, Gapwing running!");
                request_animation_frame(app);
            }),
        );
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().activate(Activation::Pointer);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().activate(Activation::Pointer);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match command_for_key(&event.code(), event.repeat()) {
                    Some(HostCommand::Activate(source)) => {
                        event.prevent_default();
                        app.borrow_mut().activate(source);
                    }
                    Some(HostCommand::ToggleDemo) => app.borrow_mut().toggle_demo(),
                    Some(HostCommand::ToggleMute) => app.borrow_mut().toggle_mute(),
                    None => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gapwing (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let frames = parse_arg(args.next(), "frames", 3600u64);
    let seed = parse_arg(args.next(), "seed", 1u64);

    run_headless(frames, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr + std::fmt::Display>(arg: Option<String>, name: &str, default: T) -> T {
    match arg {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} '{}', using {}", name, raw, default);
            default
        }),
    }
}

/// Let the autopilot play for a fixed number of frames and report the result
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(frames: u64, seed: u64) {
    use gapwing::sim::{Autopilot, Cue, Game};

    let mut game = Game::new(seed);
    let mut bot = Autopilot::default();
    let mut cues: Vec<Cue> = Vec::new();
    let mut runs = 0u32;

    for _ in 0..frames {
        if bot.wants_flap(&game) {
            if game.phase() == gapwing::GamePhase::Ready {
                runs += 1;
            }
            game.handle_input(&mut cues);
        }
        game.tick(&mut cues);
    }

    for cue in [Cue::Flap, Cue::Score, Cue::Hit] {
        let count = cues.iter().filter(|c| **c == cue).count();
        log::info!("{} cues: {}", cue.name(), count);
    }
    println!(
        "{} frames, {} runs, current score {}, best score {}",
        frames,
        runs,
        game.score(),
        game.best_score().max(game.score())
    );
}
