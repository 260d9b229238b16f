//! Frog Rage entry point
//!
//! Handles platform-specific initialization and runs the game loop. In the
//! browser the presentation layer reads a JSON snapshot published on `window`
//! every frame and sends commands back as `frog-rage-command` events.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use frog_rage::Session;
    use frog_rage::audio::{self, AudioManager};
    use frog_rage::platform::{KeyValueStore, LocalStore, MemoryStore, StorageError, now_ms};
    use frog_rage::sim::GameEvent;

    /// Window property holding the latest snapshot JSON
    const SNAPSHOT_PROPERTY: &str = "frogRageSnapshot";
    /// Window property holding the last frame's events as JSON
    const EVENTS_PROPERTY: &str = "frogRageEvents";
    /// CustomEvent whose `detail` is a JSON command
    const COMMAND_EVENT: &str = "frog-rage-command";

    /// LocalStorage when the browser allows it, memory otherwise
    enum BrowserStore {
        Local(LocalStore),
        Memory(MemoryStore),
    }

    impl BrowserStore {
        fn open() -> Self {
            match LocalStore::open() {
                Ok(store) => BrowserStore::Local(store),
                Err(e) => {
                    log::warn!("{} - progress will not be saved", e);
                    BrowserStore::Memory(MemoryStore::new())
                }
            }
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Option<String> {
            match self {
                BrowserStore::Local(store) => store.get(key),
                BrowserStore::Memory(store) => store.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            match self {
                BrowserStore::Local(store) => store.set(key, value),
                BrowserStore::Memory(store) => store.set(key, value),
            }
        }
    }

    struct Game {
        session: Session<BrowserStore>,
        audio: AudioManager,
        window: web_sys::Window,
    }

    impl Game {
        fn frame(&mut self) {
            let now = now_ms();
            let events = self.session.frame(now);

            for cue in audio::cues(&events) {
                self.audio.play(cue, self.session.settings());
            }
            for event in &events {
                match event {
                    GameEvent::Sound { .. } => {}
                    other => log::debug!("{:?}", other),
                }
            }

            self.publish(now, &events);
        }

        fn publish(&self, now: f64, events: &[GameEvent]) {
            match self.session.snapshot_json(now) {
                Ok(json) => self.set_property(SNAPSHOT_PROPERTY, &json),
                Err(e) => log::warn!("Failed to encode snapshot: {}", e),
            }
            if !events.is_empty() {
                match serde_json::to_string(events) {
                    Ok(json) => self.set_property(EVENTS_PROPERTY, &json),
                    Err(e) => log::warn!("Failed to encode events: {}", e),
                }
            }
        }

        fn set_property(&self, name: &str, json: &str) {
            let _ = js_sys::Reflect::set(
                &self.window,
                &JsValue::from_str(name),
                &JsValue::from_str(json),
            );
        }

        fn viewport_width(&self) -> f32 {
            self.window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0) as f32
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Frog Rage starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window - cannot start");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, BrowserStore::open()),
            audio: AudioManager::new(),
            window: window.clone(),
        }));
        {
            let mut g = game.borrow_mut();
            let width = g.viewport_width();
            g.session.resize(width);
        }

        setup_keyboard(&window, game.clone());
        setup_window_events(&window, game.clone());
        setup_command_listener(&window, game.clone());

        request_animation_frame(game);

        log::info!("Frog Rage running!");
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                // First key press counts as the user gesture audio needs
                g.audio.resume();
                if g.session.key_down(&event.key(), event.repeat()) {
                    // Space would scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_events(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let width = g.viewport_width();
                g.session.resize(width);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Blur: keys released outside the window never send keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.blur();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_command_listener(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::CustomEvent| {
            let Some(json) = event.detail().as_string() else {
                log::debug!("Ignoring {} without a string detail", COMMAND_EVENT);
                return;
            };
            let mut g = game.borrow_mut();
            g.session.dispatch_json(&json);
            let now = now_ms();
            g.publish(now, &[]);
        });
        let _ = window
            .add_event_listener_with_callback(COMMAND_EVENT, closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().frame();
        request_animation_frame(game);
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
    log::info!("Frog Rage (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Hold right and hop once a second for a minute of simulated play
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use frog_rage::Session;
    use frog_rage::platform::MemoryStore;
    use frog_rage::session::frames_for;
    use frog_rage::sim::GameEvent;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let mut session = Session::new(0xF706, MemoryStore::new());
    session.resize(900.0);
    session.key_down("ArrowRight", false);

    for frame in 0..frames_for(60_000.0, FRAME_MS) {
        if frame % 60 == 0 {
            session.key_down(" ", false);
            session.key_up(" ");
        }
        for event in session.frame(frame as f64 * FRAME_MS) {
            match event {
                GameEvent::Sound { .. } => {}
                other => log::info!("{:?}", other),
            }
        }
        if session.state().game_over {
            break;
        }
    }

    let state = session.state();
    println!(
        "Demo finished: level {}, score {}, high score {}, rage {}, lives {}",
        state.level, state.score, state.high_score, state.rage, state.lives
    );
}
