//! Stage -- game entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Keyboard events arrive
//! as window events between frames; gamepad events are drained from gilrs just
//! before the clock advances. Either way an event carries the previous frame's
//! `now`, which the next frame's forgiveness window covers exactly once. Both
//! are published on one `InputEventHub` and land in the single
//! `InputNormalizer` owned by `App`, which outlives every scene.
//!
//! Per frame:
//!
//!   1. drain gamepad events into the hub
//!   2. `begin_frame()` -- advance the scene clock
//!   3. `Stage::update` -- preload step, splash fade, input reactions
//!   4. mirror splash progress into the window title

mod gamepad;
mod keyboard;
mod loader;
mod plugin;
mod stage;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use gamepad::GamepadPoller;
use plugin::NormalizedInputPlugin;
use stage::{Stage, StageAction};
use stg_core::bindings::load_bindings_from_path;
use stg_core::config::load_config_from_path;
use stg_core::{
    GameConfig, InputBindings, InputEventHub, InputNormalizer, PhysicalInput, RawInputEvent,
    SceneClock,
};
use stg_platform::window::PlatformConfig;

const CONFIG_PATH: &str = "assets/config.json";

struct GameState {
    window: Arc<Window>,
    clock: SceneClock,
    hub: InputEventHub,
    gamepads: GamepadPoller,
    stage: Stage,
    title: String,
}

struct App {
    config: GameConfig,
    platform: PlatformConfig,
    input: Rc<RefCell<InputNormalizer>>,
    state: Option<GameState>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        let bindings = load_bindings(&config);
        Self {
            platform: PlatformConfig::from_game_config(&config),
            input: Rc::new(RefCell::new(InputNormalizer::with_bindings(bindings))),
            config,
            state: None,
        }
    }
}

impl GameState {
    fn refresh_title(&mut self, base: &str) {
        let splash = self.stage.splash();
        let title = if splash.is_visible() {
            format!("{base} (loading {})", splash.progress_text())
        } else if self.stage.is_paused() {
            format!("{base} (paused)")
        } else {
            base.to_string()
        };
        if title != self.title {
            for (id, value) in splash.elements() {
                log::debug!("#{id}: {value}");
            }
            self.window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = match stg_platform::window::create_window(event_loop, &self.platform) {
            Ok(window) => window,
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let clock = SceneClock::new();
        let mut hub = InputEventHub::new();
        let plugin = NormalizedInputPlugin::new(self.input.clone(), clock.handle());
        let mut stage = Stage::new(plugin, PathBuf::from(&self.config.manifest_path));
        stage.start(&mut hub);

        self.state = Some(GameState {
            window,
            clock,
            hub,
            gamepads: GamepadPoller::new(),
            stage,
            title: String::new(),
        });
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                state.stage.destroy(&mut state.hub);
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let window = (physical_size.width, physical_size.height);
                if window.0 > 0 && window.1 > 0 {
                    let size = self.config.fit_size(window.0, window.1);
                    let offset = self.config.center_offset(window, size);
                    log::info!(
                        "Resized to {}x{}, presenting {}x{} at {:?}",
                        window.0,
                        window.1,
                        size.0,
                        size.1,
                        offset
                    );
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(code) = keyboard::key_code_name(key_code) {
                        let input = PhysicalInput::key(code);
                        state.hub.dispatch(&match event.state {
                            ElementState::Pressed => RawInputEvent::down(input),
                            ElementState::Released => RawInputEvent::up(input),
                        });
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                for raw in state.gamepads.poll() {
                    state.hub.dispatch(&raw);
                }

                state.clock.begin_frame();

                let action = state
                    .stage
                    .update(state.clock.now(), state.clock.frame_ms);
                state.refresh_title(&self.config.title);

                if state.clock.frame_count % 600 == 0 {
                    log::debug!(
                        "Frame {}: {:.1}ms, active device {}",
                        state.clock.frame_count,
                        state.clock.real_dt_ms,
                        self.input.borrow().active_device()
                    );
                }

                if action == StageAction::Exit {
                    state.stage.destroy(&mut state.hub);
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn load_config() -> GameConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return GameConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            log::error!("{err}. Falling back to default config.");
            GameConfig::default()
        }
    }
}

fn load_bindings(config: &GameConfig) -> InputBindings {
    let Some(path) = config.bindings_path.as_deref() else {
        return InputBindings::default();
    };
    match load_bindings_from_path(Path::new(path)) {
        Ok(bindings) => {
            log::info!("Loaded input bindings from {path}");
            bindings
        }
        Err(err) => {
            log::warn!("{err}. Using default bindings.");
            InputBindings::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Stage starting...");

    let config = load_config();
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
