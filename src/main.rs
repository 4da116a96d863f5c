//! Simple Jump entry point
//!
//! Native builds run one level headless with the autopilot steering and print
//! the outcome. The wasm32 build draws to a 2D canvas and reads the arrow keys.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};

    use simple_jump::sim::SystemClock;
    use simple_jump::{FrameSnapshot, InputEvent, Renderer, Screen, Session, Settings};

    /// Visible world height in pixels
    const VIEW_HEIGHT: f32 = 600.0;

    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl CanvasRenderer {
        fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
                .dyn_into()?;
            Ok(Self {
                ctx,
                width: canvas.width() as f64,
                height: canvas.height() as f64,
            })
        }

        fn clear(&self, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        }

        /// Start and end screens
        fn draw_message(&self, background: &str, title: &str, hint: &str) {
            self.clear(background);
            self.ctx.set_fill_style_str("#000000");
            self.ctx.set_font("32px sans-serif");
            let _ = self.ctx.fill_text(title, 40.0, self.height / 2.0 - 20.0);
            self.ctx.set_font("18px sans-serif");
            let _ = self.ctx.fill_text(hint, 40.0, self.height / 2.0 + 20.0);
        }
    }

    impl Renderer for CanvasRenderer {
        fn draw(&mut self, frame: &FrameSnapshot) {
            self.clear(&frame.background);
            let view = self.height as f32;
            for rect in frame.platforms.iter().chain(std::iter::once(&frame.player)) {
                self.ctx.set_fill_style_str(&rect.color);
                self.ctx.fill_rect(
                    rect.x as f64,
                    rect.screen_y(frame.camera_y, view) as f64,
                    rect.width as f64,
                    rect.height as f64,
                );
            }
            self.ctx.set_fill_style_str("#000000");
            self.ctx.set_font("20px sans-serif");
            let _ = self.ctx.fill_text(&frame.score_text(), 10.0, 26.0);
        }
    }

    struct App {
        session: Session,
        clock: SystemClock,
        renderer: CanvasRenderer,
        _keys: Option<KeyHooks>,
    }

    impl App {
        fn render(&mut self) {
            let background = self.session.settings().level.level_color.clone();
            match self.session.screen() {
                Screen::Start => self.renderer.draw_message(
                    &background,
                    "Simple Jump",
                    "Press Space to play, arrows to steer",
                ),
                Screen::Ended(outcome) => {
                    let title = if outcome.won { "You won!" } else { "Game over" };
                    let hint = format!("Score : {}  (Space to continue)", outcome.score);
                    self.renderer.draw_message(&background, title, &hint);
                }
                Screen::Playing => {
                    if let Some(level) = self.session.level() {
                        let frame = FrameSnapshot::capture(level, VIEW_HEIGHT);
                        self.renderer.draw(&frame);
                    }
                }
            }
        }

        fn key_down(&mut self, key: &str, key_code: u32) {
            match (key, self.session.screen()) {
                (" " | "Enter", Screen::Start) => {
                    let seed = js_sys::Date::now() as u64;
                    log::info!("Starting level with seed {}", seed);
                    self.session.play(seed);
                }
                (" " | "Enter", Screen::Ended(_)) => self.session.back_to_start(),
                _ => {
                    if let Some(event) = InputEvent::key_down(key, key_code) {
                        self.session.handle_input(event);
                    }
                }
            }
        }

        fn key_up(&mut self, key: &str, key_code: u32) {
            if let Some(event) = InputEvent::key_up(key, key_code) {
                self.session.handle_input(event);
            }
        }
    }

    /// Window keyboard listeners, removed when dropped
    struct KeyHooks {
        window: Window,
        down: Closure<dyn FnMut(KeyboardEvent)>,
        up: Closure<dyn FnMut(KeyboardEvent)>,
    }

    impl KeyHooks {
        fn install(window: &Window, app: Weak<RefCell<App>>) -> Result<Self, JsValue> {
            let down = {
                let app = app.clone();
                Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                    let Some(app) = app.upgrade() else {
                        return;
                    };
                    let key = event.key();
                    if matches!(key.as_str(), " " | "ArrowLeft" | "ArrowRight") {
                        event.prevent_default();
                    }
                    app.borrow_mut().key_down(&key, event.key_code());
                })
            };
            let up = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(app) = app.upgrade() {
                    app.borrow_mut().key_up(&event.key(), event.key_code());
                }
            });
            window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;
            window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;
            Ok(Self {
                window: window.clone(),
                down,
                up,
            })
        }
    }

    impl Drop for KeyHooks {
        fn drop(&mut self) {
            let _ = self
                .window
                .remove_event_listener_with_callback("keydown", self.down.as_ref().unchecked_ref());
            let _ = self
                .window
                .remove_event_listener_with_callback("keyup", self.up.as_ref().unchecked_ref());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Simple Jump starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        canvas.set_width(settings.level.level_width as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let renderer = CanvasRenderer::new(&canvas)?;
        let app = Rc::new(RefCell::new(App {
            session: Session::new(settings),
            clock: SystemClock::new(),
            renderer,
            _keys: None,
        }));
        let keys = KeyHooks::install(&window, Rc::downgrade(&app))?;
        app.borrow_mut()._keys = Some(keys);

        request_animation_frame(app);
        log::info!("Simple Jump running!");
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut guard = app.borrow_mut();
            let app = &mut *guard;
            app.session.update(&app.clock);
            app.render();
        }
        request_animation_frame(app);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Give up after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_AUTOPLAY_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Simple Jump (native) starting...");

    let settings = simple_jump::Settings::load();
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            log::warn!("Ignoring seed {:?}: {}", arg, e);
            time_seed()
        }),
        None => time_seed(),
    };

    let mut session = simple_jump::Session::new(settings);
    let Some(outcome) = session.autoplay(seed, MAX_AUTOPLAY_FRAMES) else {
        std::process::exit(1);
    };
    match serde_json::to_string(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize outcome: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
