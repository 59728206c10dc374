//! Voxpaint - interactive voxel placement sandbox

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use voxpaint::core::camera_controller::OrbitCameraController;
use voxpaint::core::input::InputState;
use voxpaint::core::logging;
use voxpaint::core::time::FrameTimer;
use voxpaint::render::{self, GpuContext, Renderer, WindowConfig};
use voxpaint::scene::{SandboxConfig, SandboxContext};

struct App {
    window_config: WindowConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    sandbox: SandboxContext,
    input: InputState,
    orbit: OrbitCameraController,
    timer: FrameTimer,
}

impl App {
    fn new(sandbox: SandboxContext, window_config: WindowConfig) -> Self {
        let orbit = OrbitCameraController::from_camera(
            sandbox.camera(),
            sandbox.config().camera.target(),
        );
        Self {
            input: InputState::new(window_config.width, window_config.height),
            window_config,
            window: None,
            gpu: None,
            renderer: None,
            sandbox,
            orbit,
            timer: FrameTimer::new(),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> voxpaint::core::types::Result<()> {
        let window = render::window::create_window(event_loop, &self.window_config)?;
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let renderer = Renderer::new(&gpu, self.sandbox.config());

        let (width, height) = gpu.size();
        self.input.set_viewport(width, height);
        self.sandbox.camera_mut().set_aspect(width as f32, height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.sandbox.teardown();
        event_loop.exit();
    }

    fn handle_shortcut(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => self.shutdown(event_loop),
            KeyCode::Space => {
                let running = self.sandbox.toggle_playback();
                log::info!("Playback {}", if running { "resumed" } else { "paused" });
            }
            KeyCode::KeyC => self.sandbox.clear(),
            _ => {}
        }
    }

    fn frame(&mut self) {
        if self.sandbox.is_torn_down() {
            return;
        }
        if self.timer.tick() {
            log::debug!(
                "{:.1} FPS, {} cube(s) drawn, {} transition(s)",
                self.timer.fps(),
                self.sandbox.scene().voxel_count(),
                self.sandbox.animator().in_flight()
            );
        }

        self.sandbox.advance(self.timer.delta());

        let mut camera = self.sandbox.camera().clone();
        if self.orbit.update(&mut camera, &self.input) {
            *self.sandbox.camera_mut() = camera;
        }
        self.input.end_frame();

        if !self.sandbox.take_render_request() {
            return;
        }
        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else { return };
        let instances = self.sandbox.instances();
        if let Err(e) = renderer.render(gpu, self.sandbox.camera(), &instances) {
            log::warn!("Frame skipped: {}", e);
            self.sandbox.request_render();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Failed to initialize graphics: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(input) = self.input.process_event(&event) {
            self.sandbox.dispatch(input);
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                    }
                    self.sandbox
                        .camera_mut()
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.handle_shortcut(event_loop, code);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Voxpaint starting...");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match SandboxConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SandboxConfig::default(),
    };

    let window_config = WindowConfig::default();
    let sandbox = match SandboxContext::new(config, window_config.aspect()) {
        Ok(sandbox) => sandbox,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(sandbox, window_config);
    if let Err(e) = render::window::run(&mut app) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
