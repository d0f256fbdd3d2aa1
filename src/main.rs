//! Cookie Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use cookie_invaders::Settings;
    use cookie_invaders::audio::{AudioManager, SoundEffect};
    use cookie_invaders::consts::*;
    use cookie_invaders::render::CanvasRenderer;
    use cookie_invaders::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Application instance holding all state
    struct App {
        state: GameState,
        input: TickInput,
        settings: Settings,
        audio: AudioManager,
        renderer: Option<CanvasRenderer>,
        accumulator: f32,
        last_time: f64,
    }

    impl App {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(seed, width, height),
                input: TickInput::default(),
                settings,
                audio,
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks with a fixed-timestep accumulator
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.restart = false;
            }
        }

        /// Turn simulation events into audio and logs
        fn dispatch_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::ShotFired => self.audio.play(SoundEffect::Shoot),
                    GameEvent::EnemyDestroyed { .. } => self.audio.play(SoundEffect::Explosion),
                    GameEvent::PlayerHit => self.audio.play(SoundEffect::Damage),
                    GameEvent::LevelUp { level } => {
                        self.audio.play(SoundEffect::LevelUp);
                        log::info!("Level up: now on level {}", level + 1);
                    }
                    GameEvent::GameOver => {
                        self.audio.play(SoundEffect::GameOver);
                        log::info!("Game over on level {}", self.state.level_index + 1);
                    }
                    GameEvent::Victory => {
                        self.audio.play(SoundEffect::Victory);
                        log::info!("Victory!");
                    }
                }
            }
        }

        /// Flip the persisted mute preference
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
            log::info!(
                "Audio {}",
                if self.settings.muted { "muted" } else { "unmuted" }
            );
        }

        /// Render the current frame
        fn render(&mut self, dt: f32) {
            if let Some(renderer) = &mut self.renderer {
                renderer.draw(&self.state, &self.settings, dt);
            }
        }

        /// Sync HUD text and overlay visibility with the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!(
                    "COOKIES: {} / {}",
                    self.state.kills_this_level, KILLS_PER_LEVEL
                )));
            }
            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&format!("LEVEL: {}", self.state.level_index + 1)));
            }
            if let Some(el) = document.get_element_by_id("health") {
                el.set_text_content(Some(&"\u{2764}\u{FE0F}".repeat(self.state.lives as usize)));
            }

            let phase = self.state.phase;
            set_hidden(&document, "menu-overlay", phase != GamePhase::Menu);
            set_hidden(&document, "game-over", phase != GamePhase::GameOver);
            set_hidden(&document, "victory", phase != GamePhase::Victory);
            set_hidden(&document, "ui", phase == GamePhase::Menu);
        }
    }

    /// Toggle the `hidden` class on an element by id
    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Map a key name onto the held-input state. Returns false for
    /// unhandled keys so the browser keeps its default behavior.
    fn apply_key(input: &mut TickInput, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => input.left = pressed,
            "ArrowRight" | "d" | "D" => input.right = pressed,
            "ArrowUp" | "w" | "W" => input.up = pressed,
            "ArrowDown" | "s" | "S" => input.down = pressed,
            " " => input.fire = pressed,
            "Enter" => {
                if pressed {
                    input.start = true;
                    input.restart = true;
                }
            }
            _ => return false,
        }
        true
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cookie Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, width as f32, height as f32)));
        log::info!(
            "Game initialized with seed: {}",
            app.borrow().state.seed
        );

        match CanvasRenderer::new(canvas.clone()) {
            Ok(renderer) => app.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Failed to create renderer: {e:?}"),
        }

        setup_resize_handler(&canvas, app.clone());
        setup_keyboard_handlers(app.clone());
        setup_touch_controls(&document, app.clone());
        setup_buttons(&document, app.clone());
        setup_blur_mute(app.clone());

        request_animation_frame(app);

        log::info!("Cookie Invaders running!");
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            app.borrow_mut().state.resize(w as f32, h as f32);
        });
        let _ = web_sys::window()
            .unwrap()
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if matches!(key.as_str(), "m" | "M") {
                    a.toggle_mute();
                    return;
                }
                if apply_key(&mut a.input, key.as_str(), true) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                apply_key(&mut a.input, event.key().as_str(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire up the on-screen control buttons for mobile (plus mouse events
    /// so they work on desktop too)
    fn setup_touch_controls(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        let Ok(buttons) = document.query_selector_all(".control-btn") else {
            return;
        };

        for i in 0..buttons.length() {
            let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(key) = el.get_attribute("data-key") else {
                continue;
            };

            {
                let app = app.clone();
                let key = key.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    apply_key(&mut app.borrow_mut().input, &key, true);
                });
                let _ = el.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            {
                let app = app.clone();
                let key = key.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    apply_key(&mut app.borrow_mut().input, &key, false);
                });
                let _ = el.add_event_listener_with_callback(
                    "touchend",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            {
                let app = app.clone();
                let key = key.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    apply_key(&mut app.borrow_mut().input, &key, true);
                });
                let _ = el.add_event_listener_with_callback(
                    "mousedown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            for release in ["mouseup", "mouseleave"] {
                let app = app.clone();
                let key = key.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    apply_key(&mut app.borrow_mut().input, &key, false);
                });
                let _ =
                    el.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        // Play button starts the run and resumes audio (user gesture)
        if let Some(btn) = document.get_element_by_id("btn-play") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for id in ["btn-restart", "btn-restart-win"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow_mut().input.restart = true;
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Mute audio while the window is unfocused (if enabled in settings)
    fn setup_blur_mute(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.settings.mute_on_blur {
                    a.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                // Restore the player's own mute preference
                let mut a = app.borrow_mut();
                let muted = a.settings.muted;
                a.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.dispatch_events();
            a.render(dt);
            a.update_hud();
        }

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
    log::info!("Cookie Invaders (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_smoke();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation for ten seconds without a renderer as a sanity check
#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke() {
    use cookie_invaders::consts::SIM_DT;
    use cookie_invaders::sim::{GameState, TickInput, tick};

    let mut state = GameState::new(1234, 800.0, 600.0);
    state.start();

    let input = TickInput {
        fire: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input, SIM_DT);
    }

    println!(
        "10s headless run: {} enemies on screen, {} kills this level, {} lives left",
        state.enemies.len(),
        state.kills_this_level,
        state.lives
    );
}
