//! Render pipelines

pub mod grid;
pub mod voxel;

pub use grid::{GridPipeline, GridVertex, grid_vertices};
pub use voxel::{CubeVertex, VoxelPipeline, cube_vertices};
