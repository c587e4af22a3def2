//! Circus Jump entry point
//!
//! In the browser this wires the DOM to the game and drives it with
//! `requestAnimationFrame`. Natively it plays one headless round on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use circus_jump::audio::{AudioManager, AudioSink, SoundCue};
    use circus_jump::driver::{FrameScheduler, LoopDriver, LoopState};
    use circus_jump::input::{Autopilot, InputState};
    use circus_jump::menu::{MenuState, Screen};
    use circus_jump::persistence::{HighScoreStore, LocalStorage};
    use circus_jump::renderer::CanvasRenderer;
    use circus_jump::sim::RoundStatus;
    use circus_jump::{Game, GameError, Settings, Viewport};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` with a single reusable callback
    struct RafScheduler {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> Result<i32, GameError> {
            let callback = self.callback.borrow();
            let callback = callback
                .as_ref()
                .ok_or_else(|| GameError::Schedule("frame callback not installed".into()))?;
            Ok(self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?)
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("Failed to cancel frame {}: {:?}", handle, e);
            }
        }
    }

    type WebGame = Game<Rc<RefCell<InputState>>, AudioManager, HighScoreStore<LocalStorage>>;

    /// Everything the page needs, shared between event closures
    struct App {
        document: Document,
        game: WebGame,
        driver: LoopDriver<RafScheduler>,
        renderer: CanvasRenderer,
        menu: MenuState,
        input: Rc<RefCell<InputState>>,
        settings: Settings,
        settings_store: LocalStorage,
        autopilot: Option<Autopilot>,
    }

    impl App {
        fn start_game(&mut self) {
            self.menu.start_game();
            self.game.init();
            self.game.audio_mut().on_music_start();
            if let Err(e) = self.driver.start() {
                self.show_error(&e.to_string());
                return;
            }
            self.sync_overlays();
        }

        fn restart_game(&mut self) {
            self.menu.restart_game();
            self.start_game();
        }

        fn show_instructions(&mut self) {
            self.menu.show_instructions();
            let audio = self.game.audio_mut();
            audio.play(SoundCue::MenuSelect);
            audio.stop_music();
            self.sync_overlays();
        }

        fn hide_instructions(&mut self) {
            self.menu.hide_instructions();
            self.game.audio_mut().play(SoundCue::MenuBack);
            self.sync_overlays();
        }

        fn toggle_mute(&mut self) {
            let muted = self.game.audio_mut().toggle_mute();
            self.settings.muted = muted;
            if let Err(e) = self.settings.save(&mut self.settings_store) {
                log::warn!("Failed to save settings: {}", e);
            }
            self.sync_mute_label();
        }

        fn sync_mute_label(&mut self) {
            let muted = self.game.audio_mut().is_muted();
            set_text(&self.document, "mute-btn", if muted { "Unmute" } else { "Mute" });
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::default()),
            };
            if self.autopilot.is_none() {
                self.input.borrow_mut().clear();
            }
            log::info!("Autopilot: {}", self.autopilot.is_some());
        }

        fn resize(&mut self, window: &Window) {
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            self.game.resize(Viewport::fit(width as f32, height as f32));
        }

        fn frame(&mut self) {
            if let Some(pilot) = self.autopilot {
                let controls = pilot.decide(self.game.state());
                self.input.borrow_mut().set_controls(controls);
            }

            let state = self.driver.frame(&mut self.game, &mut self.renderer).clone();
            match state {
                LoopState::Stopped(status) => self.finish_round(status),
                LoopState::Faulted(message) => self.show_error(&message),
                LoopState::Idle | LoopState::Running => {}
            }
        }

        fn finish_round(&mut self, status: RoundStatus) {
            match status {
                RoundStatus::GameOver { score } => self.menu.on_game_over(score),
                RoundStatus::LevelComplete { score } => self.menu.on_level_complete(score),
                RoundStatus::Ready | RoundStatus::Playing => return,
            }
            set_text(&self.document, "final-score", &self.menu.score.to_string());
            set_text(&self.document, "win-score", &self.menu.score.to_string());
            set_text(&self.document, "high-score", &self.menu.high_score.to_string());
            self.sync_overlays();
        }

        fn show_error(&mut self, message: &str) {
            self.input.borrow_mut().enabled = false;
            self.game.audio_mut().stop_music();
            set_text(&self.document, "error-detail", message);
            show(&self.document, "error-screen", true);
        }

        /// One overlay per menu screen; controls are live only with no overlay up
        fn sync_overlays(&self) {
            {
                let mut input = self.input.borrow_mut();
                if !self.menu.accepts_input() {
                    input.clear();
                }
                input.enabled = self.menu.accepts_input();
            }
            let screen = self.menu.screen;
            show(&self.document, "title-screen", screen == Screen::Title);
            show(&self.document, "instructions-screen", screen == Screen::Instructions);
            show(&self.document, "gameover-screen", screen == Screen::GameOver);
            show(&self.document, "levelcomplete-screen", screen == Screen::LevelComplete);
            show(&self.document, "error-screen", false);
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::ElementMissing("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::ElementMissing("document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or_else(|| GameError::ElementMissing("game-canvas".into()))?
            .dyn_into()
            .map_err(|_| GameError::ElementMissing("game-canvas".into()))?;

        let settings_store = LocalStorage::open();
        let settings = Settings::load(&settings_store);

        let seed = js_sys::Date::now() as u64;
        let input = Rc::new(RefCell::new(InputState::new()));
        let game = Game::new(
            seed,
            input.clone(),
            AudioManager::new(&settings),
            HighScoreStore::new(LocalStorage::open()),
        );
        log::info!("Game created with seed: {}", seed);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let driver = LoopDriver::new(RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        });

        let app = Rc::new(RefCell::new(App {
            document: document.clone(),
            menu: MenuState::new(game.state().high_score),
            game,
            driver,
            renderer: CanvasRenderer::new(canvas.clone(), settings.animate_obstacles)?,
            input,
            settings,
            settings_store,
            autopilot: None,
        }));

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                app.borrow_mut().frame();
            }));
        }

        {
            let mut a = app.borrow_mut();
            a.resize(&window);
            a.sync_overlays();
            a.sync_mute_label();
            set_text(&document, "high-score", &a.menu.high_score.to_string());
        }

        setup_input_handlers(&window, &canvas, app.clone());
        setup_resize(&window, app.clone());
        on_click(&document, "start-btn", &app, App::start_game);
        on_click(&document, "instructions-btn", &app, App::show_instructions);
        on_click(&document, "close-instructions-btn", &app, App::hide_instructions);
        on_click(&document, "restart-btn", &app, App::restart_game);
        on_click(&document, "replay-btn", &app, App::restart_game);
        on_click(&document, "error-restart-btn", &app, App::restart_game);
        on_click(&document, "mute-btn", &app, App::toggle_mute);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        log::info!("Circus Jump ready");
        Ok(())
    }

    fn on_click(document: &Document, id: &str, app: &Rc<RefCell<App>>, action: fn(&mut App)) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Button `{}` not found", id);
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut app.borrow_mut());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn touch_point(event: &TouchEvent) -> Option<(Vec2, u32)> {
        let touches = event.touches();
        let touch = touches.get(0)?;
        Some((
            Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
            touches.length(),
        ))
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "i" || key == "I" {
                    app.borrow_mut().toggle_autopilot();
                    return;
                }
                let input = app.borrow().input.clone();
                if input.borrow_mut().key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = app.borrow().input.clone();
                if input.borrow_mut().key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((pos, touches)) = touch_point(&event) {
                    let input = app.borrow().input.clone();
                    input.borrow_mut().touch_start(pos, touches);
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((pos, touches)) = touch_point(&event) {
                    let input = app.borrow().input.clone();
                    input.borrow_mut().touch_move(pos, touches);
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let input = app.borrow().input.clone();
                input.borrow_mut().touch_end();
            });
            let _ = canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Resize now, then once more after layout settles
    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize(&window_clone);

            let app = app.clone();
            let window = window_clone.clone();
            let settle = Closure::once_into_js(move || {
                app.borrow_mut().resize(&window);
            });
            let _ = window_clone.set_timeout_with_callback_and_timeout_and_arguments_0(
                settle.unchecked_ref(),
                100,
            );
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Circus Jump starting...");
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use circus_jump::Game;
    use circus_jump::driver::{LoopDriver, LoopState, ManualScheduler, run_headless};
    use circus_jump::input::{Autopilot, Controls};
    use circus_jump::persistence::{HighScoreStore, MemoryStorage};
    use circus_jump::renderer::NullRenderer;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    log::info!("Circus Jump (headless) starting with seed: {}", seed);

    let mut game = Game::new(
        seed,
        Controls::default(),
        (),
        HighScoreStore::new(MemoryStorage::new()),
    );
    game.init();

    let pilot = Autopilot::default();
    let mut driver = LoopDriver::new(ManualScheduler::new());
    let mut renderer = NullRenderer::default();
    let outcome = run_headless(&mut driver, &mut game, &mut renderer, 10_000, |game| {
        let controls = pilot.decide(game.state());
        *game.input_mut() = controls;
    });

    let summary = serde_json::to_string(&game.state().diagnostics())
        .unwrap_or_else(|e| format!("<unserializable: {}>", e));
    match outcome {
        LoopState::Stopped(status) => {
            log::info!("Round over after {} frames: {}", driver.frames(), status.as_str());
        }
        other => log::warn!("Round did not finish: {:?}", other),
    }
    log::info!("Final state: {}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
