//! Voxel lattice, voxel data and the occupancy store

pub mod grid;
pub mod voxel;
pub mod store;

pub use grid::{GridCell, Lattice};
pub use store::OccupancyStore;
pub use voxel::{Material, Rgb, Voxel, VoxelId};
