//! Error types for the voxpaint sandbox

use thiserror::Error;

use crate::voxel::grid::GridCell;

/// Main error type for the sandbox
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Cell {0} is already occupied")]
    CellOccupied(GridCell),
}
