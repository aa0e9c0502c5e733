//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use brick_breaker::consts::*;
    use brick_breaker::renderer::SceneRenderer;
    use brick_breaker::sim::{FrameClock, Key, KeyEvent};
    use brick_breaker::{Game, GameEvent, Settings};

    /// Game instance plus frame bookkeeping
    struct App {
        game: Game,
        renderer: SceneRenderer,
        clock: FrameClock,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let elapsed = self.clock.elapsed_ms(time);
            let events = self.game.advance(elapsed);
            log_events(&events);

            if let Err(err) = self.renderer.render(self.game.canvas()) {
                log::error!("Render failed: {:?}", err);
            }
        }

        fn key(&mut self, event: KeyEvent) {
            let events = self.game.handle_key(event);
            log_events(&events);
        }
    }

    fn log_events(events: &[GameEvent]) {
        for event in events {
            log::debug!("{:?}", event);
        }
    }

    /// Settings from an inline `<script id="settings" type="application/json">` block
    fn load_settings(document: &Document) -> Settings {
        let Some(json) = document
            .get_element_by_id("settings")
            .and_then(|el| el.text_content())
        else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|err| {
            log::warn!("Ignoring invalid settings: {}", err);
            Settings::default()
        })
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", err).into());
        }

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        document.set_title(WINDOW_TITLE);

        let settings = load_settings(&document);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(settings.width as u32);
        canvas.set_height(settings.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let app = Rc::new(RefCell::new(App {
            game: Game::with_settings(settings),
            renderer: SceneRenderer::new(ctx),
            clock: FrameClock::new(MAX_FRAME_MS),
        }));

        setup_keyboard(&window, app.clone(), "keydown", KeyEvent::Press)?;
        setup_keyboard(&window, app.clone(), "keyup", KeyEvent::Release)?;

        request_animation_frame(app);
        log::info!("Brick Breaker initialized");
        Ok(())
    }

    fn setup_keyboard(
        window: &web_sys::Window,
        app: Rc<RefCell<App>>,
        kind: &str,
        wrap: fn(Key) -> KeyEvent,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = Key::from_dom_key(&event.key());
            // Keep arrows and space from scrolling the page
            if key != Key::Other {
                event.prevent_default();
            }
            app.borrow_mut().key(wrap(key));
        });
        window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Animation loop stopped: no window");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(err) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("Animation loop stopped: {:?}", err);
            return;
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("Startup failed: {:?}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load settings from {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => brick_breaker::Settings::default(),
    };

    run_demo(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<brick_breaker::Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(brick_breaker::Settings::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo(settings: brick_breaker::Settings) {
    use brick_breaker::consts::{DEMO_DURATION_MS, DEMO_FRAME_MS};
    use brick_breaker::sim::autopilot_input;
    use brick_breaker::{Game, GameEvent};

    match settings.to_json() {
        Ok(json) => log::debug!("Settings: {}", json),
        Err(err) => log::warn!("Failed to serialize settings: {}", err),
    }

    let mut game = Game::with_settings(settings);
    let mut elapsed = 0;

    while elapsed < DEMO_DURATION_MS {
        let mut events = Vec::new();
        if let Some(key) = autopilot_input(&game) {
            events.extend(game.handle_key(key));
        }
        events.extend(game.advance(DEMO_FRAME_MS));
        elapsed += DEMO_FRAME_MS;

        for event in events {
            match event {
                GameEvent::BrickHit { .. } => log::debug!("[{}ms] {:?}", game.now_ms(), event),
                _ => log::info!("[{}ms] {:?}", game.now_ms(), event),
            }
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}
