//! Sky Hopper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, TouchEvent};

    use sky_hopper::audio::{AudioManager, SoundEffect};
    use sky_hopper::consts::*;
    use sky_hopper::renderer::Renderer;
    use sky_hopper::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use sky_hopper::{BestTimes, Settings};

    struct Game {
        state: GameState,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, renderer: Renderer, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            let mut state = GameState::new(seed);
            state.best_times = BestTimes::load(sky_hopper::levels::level_count());

            Self {
                state,
                renderer,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pause = false;
                self.input.reset = false;

                self.handle_events();
            }

            if !self.settings.effective_particles() {
                self.state.particles.clear();
            }
        }

        /// React to events the sim emitted this tick
        fn handle_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::Jump => {
                        self.audio.play(SoundEffect::Jump);
                        self.renderer.set_player_squish(1.3);
                    }
                    GameEvent::CoinCollected => self.audio.play(SoundEffect::Coin),
                    GameEvent::Death => self.audio.play(SoundEffect::Death),
                    GameEvent::GoalReached => self.audio.play(SoundEffect::Victory),
                    GameEvent::LevelComplete => self.audio.play(SoundEffect::LevelComplete),
                    GameEvent::LevelRecord { level, time } => {
                        self.audio.play(SoundEffect::Record);
                        self.state.best_times.save_level(level);
                        log::info!("New record for level {}: {:.1}s", level + 1, time);
                    }
                    GameEvent::GlobalRecord { time } => {
                        self.state.best_times.save_global();
                        log::info!("New overall record: {:.1}s", time);
                    }
                }
            }
        }

        fn render(&mut self) {
            self.renderer.update_animations();
            self.renderer
                .render(&self.state, self.input.left, self.input.right);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Hopper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let renderer = Renderer::new(canvas.clone()).expect("Failed to create renderer");
        let settings = Settings::load();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer, settings)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Sky Hopper running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        g.input.jump = true;
                        // First gesture unlocks audio
                        g.audio.resume();
                    }
                    "Escape" => g.input.pause = true,
                    "r" | "R" => g.input.reset = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    " " | "ArrowUp" | "w" | "W" => g.input.jump = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: left third steers left, right third steers right, middle jumps
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let rect = canvas_clone.get_bounding_client_rect();
                for i in 0..event.touches().length() {
                    let Some(touch) = event.touches().get(i) else {
                        continue;
                    };
                    let x = touch.client_x() as f64 - rect.left();
                    let third = rect.width() / 3.0;
                    if x < third {
                        g.input.left = true;
                    } else if x > third * 2.0 {
                        g.input.right = true;
                    } else {
                        g.input.jump = true;
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end clears all touch-held inputs
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    let mut g = game.borrow_mut();
                    g.input.left = false;
                    g.input.right = false;
                    g.input.jump = false;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus restores audio
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_hopper::consts::SIM_DT;
    use sky_hopper::sim::{GameState, TickInput, tick};

    env_logger::init();
    log::info!("Sky Hopper (native) starting...");
    log::info!("Run with `trunk serve` for the playable web version");

    // Headless smoke run: hold right and hop for a few seconds of sim time
    let mut state = GameState::new(42);
    let input = TickInput {
        right: true,
        jump: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input, SIM_DT);
    }

    println!(
        "After 600 ticks: level {} ({}), phase {:?}, pos ({:.1}, {:.1}), score {}, coins {}",
        state.current_level + 1,
        state.level_name,
        state.phase,
        state.player.rect.x,
        state.player.rect.y,
        state.stats.score,
        state.stats.coins_collected,
    );
}
