//! Snowball Roll entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use snowball_roll::consts::*;
    use snowball_roll::platform::{Action, InputBridge};
    use snowball_roll::renderer::SceneRenderState;
    use snowball_roll::sim::{GameState, PhysicsWorld, tick};
    use snowball_roll::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        physics: PhysicsWorld,
        input: InputBridge,
        settings: Settings,
        render_state: Option<SceneRenderState>,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            Self {
                physics: PhysicsWorld::with_scene(&tuning),
                state: GameState::new(tuning, seed),
                input: InputBridge::new(),
                settings: Settings::default(),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let input = self.input.state();
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let report = tick(
                    &mut self.state,
                    &mut self.physics,
                    &input,
                    &self.settings,
                    SIM_DT,
                );
                if report.reset {
                    log::info!("Ball fell off the snowfield ({} resets)", self.state.resets);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&mut self.state, &self.physics) {
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
        fn update_hud(&self, document: &web_sys::Document) {
            if let Some(el) = document.get_element_by_id("hud-size") {
                el.set_text_content(Some(&format!("{:.2}", self.state.ball.size)));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                el.set_text_content(Some(&self.fps.to_string()));
            }
        }
    }

    /// Tuning preset from `?tuning=`, with `?impulse=timed` switching on the
    /// time-scaled roll impulse
    fn tuning_from_query(window: &web_sys::Window) -> Tuning {
        let search = window.location().search().unwrap_or_default();
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return Tuning::default();
        };

        let mut tuning = params
            .get("tuning")
            .and_then(|value| Tuning::from_query(&value))
            .unwrap_or_default();
        if params.get("impulse").as_deref() == Some("timed") {
            tuning.time_scaled_impulse = true;
        }
        tuning
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Snowball Roll starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "#canvas is not a canvas")?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = tuning_from_query(&window);
        log::info!(
            "Tuning: {} (max size {}, collider scaling {}, timed impulse {})",
            tuning.name,
            tuning.max_size,
            tuning.scale_collider,
            tuning.time_scaled_impulse
        );

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SceneRenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_key_ui(&document, &game);
        setup_input_handlers(&window, &document, game.clone());
        setup_panel(&document, game.clone());
        setup_resize(&window, canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Snowball Roll running!");
        Ok(())
    }

    /// Mirror held actions onto `#key-w`, `#key-a`, `#key-s`, `#key-d`
    fn setup_key_ui(document: &web_sys::Document, game: &Rc<RefCell<Game>>) {
        let document = document.clone();
        // Called from inside key handlers that already hold the game borrow,
        // so this listener must only touch the DOM
        game.borrow_mut().input.subscribe(move |action: Action, pressed| {
            let id = format!("key-{}", action.label().to_lowercase());
            if let Some(el) = document.get_element_by_id(&id) {
                let _ = el.class_list().toggle_with_force("active", pressed);
            }
        });
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.code()) {
                    // Arrow keys would scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside): key-ups will never arrive
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
                log::info!("Keys released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Visibility change (tab switch, minimize)
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.release_all();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn input_element(document: &web_sys::Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Operator panel: follow camera toggle, follow speed and roll force sliders
    fn setup_panel(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let defaults = game.borrow().settings.clone();

        if let Some(checkbox) = input_element(document, "follow-camera") {
            checkbox.set_checked(defaults.follow_camera);
            let game = game.clone();
            let target = checkbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().settings.follow_camera = target.checked();
            });
            let _ = checkbox
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = input_element(document, "follow-speed") {
            slider.set_value_as_number(defaults.follow_speed as f64);
            let game = game.clone();
            let target = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.settings.set_follow_speed(target.value_as_number() as f32);
                target.set_value_as_number(g.settings.follow_speed as f64);
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = input_element(document, "run-speed") {
            slider.set_value_as_number(defaults.run_speed as f64);
            let target = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.settings.set_run_speed(target.value_as_number() as f32);
                target.set_value_as_number(g.settings.run_speed as f64);
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = canvas_pixel_size(&window_clone, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snowball Roll (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    for tuning in [
        snowball_roll::Tuning::classic(),
        snowball_roll::Tuning::stepped(),
    ] {
        roll_demo(tuning);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Land the ball, then hold forward for a few seconds and log the growth
#[cfg(not(target_arch = "wasm32"))]
fn roll_demo(tuning: snowball_roll::Tuning) {
    use snowball_roll::Settings;
    use snowball_roll::consts::SIM_DT;
    use snowball_roll::platform::InputState;
    use snowball_roll::sim::{BallPhysics, GameState, PhysicsWorld, tick};

    log::info!("Rolling with the {} preset", tuning.name);
    let mut physics = PhysicsWorld::with_scene(&tuning);
    let mut state = GameState::new(tuning, 0);
    let settings = Settings::default();

    let idle = InputState::default();
    let forward = InputState {
        forward: true,
        ..Default::default()
    };

    let ticks_per_second = (1.0 / SIM_DT).round() as u64;
    for second in 0..6u64 {
        let input = if second == 0 { &idle } else { &forward };
        let mut steps = 0;
        for _ in 0..ticks_per_second {
            if tick(&mut state, &mut physics, input, &settings, SIM_DT)
                .scale_step
                .is_some()
            {
                steps += 1;
            }
        }
        let position = physics.ball_translation().unwrap_or_default();
        log::info!(
            "t={}s size={:.3} collider={:.3} steps={} pos=({:.2}, {:.2}, {:.2})",
            second + 1,
            state.ball.size,
            state.ball.physics_scale,
            steps,
            position.x,
            position.y,
            position.z
        );
    }
    log::info!(
        "{} stamps painted, {:.2}% of the snowfield uncovered",
        state.trail.stamp_count(),
        state.trail.mask.coverage() * 100.0
    );
}
