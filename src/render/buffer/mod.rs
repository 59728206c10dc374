//! GPU buffer management

pub mod camera_buffer;
pub mod instance_buffer;

pub use camera_buffer::{CameraBuffer, CameraUniform, Lighting};
pub use instance_buffer::InstanceBuffer;
