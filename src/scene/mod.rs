//! Scene state: configuration, the drawable graph and the owning sandbox context

pub mod config;
pub mod context;
pub mod flatten;
pub mod graph;
pub mod node;

pub use config::{CameraConfig, SandboxConfig};
pub use context::SandboxContext;
pub use flatten::FlatVoxelEntry;
pub use graph::SceneGraph;
pub use node::{LocalTransform, SceneNode};
