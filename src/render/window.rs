//! Window management using winit

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::core::error::Error;

/// Window configuration
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Voxpaint".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    pub fn attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.width, self.height))
    }

    /// Aspect ratio of the requested size
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Create a window from within `resumed`
pub fn create_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Arc<Window>, Error> {
    event_loop
        .create_window(config.attributes())
        .map(Arc::new)
        .map_err(|e| Error::Window(format!("Failed to create window: {}", e)))
}

/// Creates an event loop and runs the application handler until it exits
pub fn run<A: ApplicationHandler>(app: &mut A) -> Result<(), Error> {
    let event_loop = EventLoop::new()
        .map_err(|e| Error::Window(format!("Failed to create event loop: {}", e)))?;

    event_loop.set_control_flow(ControlFlow::Poll);

    event_loop
        .run_app(app)
        .map_err(|e| Error::Window(format!("Event loop error: {}", e)))?;

    Ok(())
}
