//! Neon Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use neon_defender::renderer::{HudText, RenderError, RenderState, scene};
    use neon_defender::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: TickInput,
        /// CSS size of the canvas, for pointer mapping
        client_size: Vec2,
        /// Last phase pushed to the DOM
        last_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                input: TickInput::default(),
                client_size: Vec2::ONE,
                last_phase: None,
            }
        }

        /// Convert a canvas-relative CSS position to field coordinates
        fn to_field(&self, x: f32, y: f32) -> Vec2 {
            Vec2::new(x, y) * self.state.field_size() / self.client_size.max(Vec2::ONE)
        }

        /// One simulation tick per animation frame
        fn update(&mut self) {
            tick(&mut self.state, &self.input);
            // Clear one-shot inputs after processing
            self.input.clear_commands();
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = HudText::from_state(&self.state);

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(hud.lines.first().map(String::as_str));
            }
            if let Some(el) = document.get_element_by_id("hud-level") {
                el.set_text_content(hud.lines.get(1).map(String::as_str));
            }
            if let Some(el) = document.get_element_by_id("hud-controls") {
                el.set_text_content(hud.lines.get(2).map(String::as_str));
            }

            // Overlay only changes with the phase
            if self.last_phase == Some(hud.phase) {
                return;
            }
            self.last_phase = Some(hud.phase);

            if let Some(el) = document.get_element_by_id("hud") {
                let class = if hud.phase == GamePhase::Playing { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("overlay") {
                let class = match hud.phase {
                    GamePhase::Menu => "menu",
                    GamePhase::Playing => "hidden",
                    GamePhase::GameOver => "game-over",
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("overlay-title") {
                el.set_text_content(hud.title);
            }
            if let Some(el) = document.get_element_by_id("overlay-subtitle") {
                el.set_text_content(hud.subtitle.as_deref());
            }
            if let Some(el) = document.get_element_by_id("overlay-prompt") {
                el.set_text_content(hud.prompt);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Neon Defender starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
        }
    }

    async fn start() -> Result<(), StartError> {
        let window = web_sys::window().ok_or(StartError::Dom("no window"))?;
        let document = window.document().ok_or(StartError::Dom("no document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(StartError::Dom("no canvas"))?
            .dyn_into()
            .map_err(|_| StartError::Dom("not a canvas"))?;

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Backing store matches the field, scaled for the display
        let dpr = window.device_pixel_ratio();
        let field = game.borrow().state.field_size();
        let width = (field.x as f64 * dpr) as u32;
        let height = (field.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        game.borrow_mut().client_size = Vec2::new(
            canvas.client_width() as f32,
            canvas.client_height() as f32,
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_release(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Neon Defender running!");
        Ok(())
    }

    /// Startup failures
    #[derive(thiserror::Error, Debug)]
    enum StartError {
        #[error("DOM error: {0}")]
        Dom(&'static str),

        #[error(transparent)]
        Render(#[from] RenderError),
    }

    fn set_held(input: &mut TickInput, key: &str, down: bool) -> bool {
        match key {
            "ArrowUp" | "w" | "W" => input.up = down,
            "ArrowDown" | "s" | "S" => input.down = down,
            "ArrowLeft" | "a" | "A" => input.left = down,
            "ArrowRight" | "d" | "D" => input.right = down,
            _ => return false,
        }
        true
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move - aim
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.client_size = Vec2::new(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let pointer = g.to_field(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer = pointer;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse button - fire while playing, start otherwise
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pointer = g.to_field(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer = pointer;
                let phase = g.state.phase;
                g.input.pointer_press(phase);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if set_held(&mut g.input, &key, true) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "Enter" => g.input.request_start(),
                    " " => {
                        event.prevent_default();
                        if g.state.phase == GamePhase::Playing {
                            g.input.request_shoot();
                        }
                    }
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                set_held(&mut g.input, &event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Drop held keys when the window loses focus (keyup never arrives)
    fn setup_auto_release(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.input.up = false;
            g.input.down = false;
            g.input.left = false;
            g.input.right = false;
            log::info!("Released held keys (window blur)");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
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
fn main() {
    env_logger::init();
    log::info!("Neon Defender (native) starting...");
    log::info!("Native mode runs a headless idle session - use `trunk serve` to play in a browser");

    if let Err(e) = headless::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_defender::Tuning;
    use neon_defender::TuningError;
    use neon_defender::consts::TICKS_PER_SECOND;
    use neon_defender::sim::{GamePhase, GameState, TickInput, tick};

    const DEFAULT_SEED: u64 = 1;
    const DEFAULT_TICKS: u64 = 60 * 60 * 5;

    /// `[seed] [ticks] [tuning.json]`
    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), TuningError> {
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED);
        let max_ticks = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TICKS);
        let tuning = match args.next() {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let mut state = GameState::with_tuning(seed, tuning)?;
        log::info!("Headless run: seed {}, up to {} ticks", seed, max_ticks);

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..max_ticks {
            tick(&mut state, &input);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Finished after {} ticks (~{}s): phase {:?}, score {}, level {}, kills {}",
            state.time_ticks,
            state.time_ticks / TICKS_PER_SECOND as u64,
            state.phase,
            state.score,
            state.level,
            state.kills
        );
        Ok(())
    }
}
