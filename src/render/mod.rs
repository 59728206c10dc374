//! Rendering system and GPU interfaces

pub mod window;
pub mod context;
pub mod buffer;
pub mod pipeline;
pub mod renderer;

pub use context::GpuContext;
pub use renderer::Renderer;
pub use window::WindowConfig;
