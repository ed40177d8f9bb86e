//! Bounce Bloom entry point
//!
//! Browser: WebGPU canvas, Web Audio ping, Space spawns a body, Escape pauses.
//! Native: headless run, optional settings JSON path as the first argument.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use bounce_bloom::audio::AudioManager;
    use bounce_bloom::platform::{EdgeTrigger, FrameClock};
    use bounce_bloom::renderer::{RenderState, SceneBuilder};
    use bounce_bloom::sim::{self, BodyStore, SimRng};
    use bounce_bloom::{Settings, SimError};

    /// World units from center to the edge of the shorter screen axis
    const VIEW_EXTENT: f32 = 1.0;

    /// App instance holding all state
    struct App {
        settings: Settings,
        store: BodyStore,
        rng: SimRng,
        clock: FrameClock,
        spawn_key: EdgeTrigger,
        space_down: bool,
        paused: bool,
        audio: AudioManager,
        scene: SceneBuilder,
        render_state: Option<RenderState>,
        collisions: u64,
    }

    impl App {
        fn new(settings: Settings, seed: u64) -> Result<Self, SimError> {
            let mut rng = SimRng::new(seed);
            let store = BodyStore::seeded(&mut rng, &settings.sim)?;

            let audio = AudioManager::new(settings.effect_volume());

            Ok(Self {
                clock: FrameClock::new(settings.max_frame_time),
                scene: SceneBuilder::new(settings.sim.boundary_radius),
                settings,
                store,
                rng,
                spawn_key: EdgeTrigger::new(),
                space_down: false,
                paused: false,
                audio,
                render_state: None,
                collisions: 0,
            })
        }

        /// One frame: input, then the step, in that order
        fn update(&mut self, now_secs: f64) {
            let elapsed = self.clock.tick(now_secs);

            if self.spawn_key.update(self.space_down) {
                self.spawn();
            }
            if self.paused {
                return;
            }

            let report = sim::step(
                &mut self.store,
                elapsed,
                &self.settings.sim,
                &mut self.rng,
                &mut self.audio,
            );
            self.collisions += report.collisions as u64;
        }

        fn spawn(&mut self) {
            match sim::seed(&mut self.rng, &self.settings.sim) {
                Ok(body) => {
                    if self.store.append(body) {
                        log::info!("Spawned body ({} total)", self.store.len());
                    } else {
                        log::info!("Population cap {} reached", self.store.max_bodies());
                    }
                }
                Err(e) => log::warn!("Spawn failed: {}", e),
            }
        }

        fn toggle_pause(&mut self) {
            self.paused = !self.paused;
            self.clock.reset();
            log::info!(
                "{} ({} bodies, {} collisions)",
                if self.paused { "Paused" } else { "Resumed" },
                self.store.len(),
                self.collisions
            );
        }

        /// Render the current frame (after the step has finished)
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = self.scene.build(&self.store);
            match render_state.render(vertices) {
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

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bounce Bloom starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        // Write back so the stored entry exists and holds the clamped values
        settings.save();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let app = match App::new(settings, seed) {
            Ok(app) => Rc::new(RefCell::new(app)),
            Err(e) => {
                log::error!("Cannot start simulation: {}", e);
                return;
            }
        };
        log::info!("Simulation seeded with {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, VIEW_EXTENT).await
                        {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(app.clone());
        setup_focus_handlers(app.clone());

        request_animation_frame(app);

        log::info!("Bounce Bloom running! Space spawns a body, Escape pauses.");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Key down: Space is polled per frame, Escape toggles immediately
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        a.audio.resume();
                        a.space_down = true;
                    }
                    "Escape" if !event.repeat() => a.toggle_pause(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == " " {
                    app.borrow_mut().space_down = false;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Window blur: the key-up may never arrive, and optionally go quiet
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.space_down = false;
                if a.settings.mute_on_blur {
                    a.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time_ms: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time_ms / 1000.0);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use bounce_bloom::{Settings, headless};
    use std::process::ExitCode;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bounce Bloom (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 for the interactive version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    match headless::run(&settings, seed) {
        Ok(summary) => {
            println!(
                "seed {}: {} frames, {} bodies, {} collisions, {} duplicates dropped",
                summary.seed,
                summary.frames,
                summary.population,
                summary.collisions,
                summary.dropped
            );
            if let Some(frame) = summary.saturated_at {
                println!("population cap reached at frame {}", frame);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Simulation failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}
