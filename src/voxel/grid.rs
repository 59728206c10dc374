//! Grid lattice: world positions to integer cells and back

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};
use crate::math::Aabb;

/// Integer cell coordinate on the voxel lattice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCell {
    /// Create a new cell coordinate
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell one step away along `offset`
    pub fn offset(self, offset: IVec3) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for GridCell {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<GridCell> for [i32; 3] {
    fn from(cell: GridCell) -> Self {
        [cell.x, cell.y, cell.z]
    }
}

/// Uniform cubic lattice of `cell_width` sized cells, cell (0, 0, 0) spanning [0, w) on each axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    cell_width: f32,
}

impl Lattice {
    /// Create a lattice. The width is validated by the configuration, not here.
    pub fn new(cell_width: f32) -> Self {
        Self { cell_width }
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Cell containing a world position (floor division on every axis)
    pub fn snap_to_cell(&self, point: Vec3) -> GridCell {
        let cell = (point / self.cell_width).floor();
        GridCell::new(cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// World position of a cell's center
    pub fn cell_center(&self, cell: GridCell) -> Vec3 {
        cell.as_ivec3().as_vec3() * self.cell_width + Vec3::splat(self.cell_width * 0.5)
    }

    /// World-space bounds of a cell
    pub fn cell_bounds(&self, cell: GridCell) -> Aabb {
        Aabb::cube(self.cell_center(cell), self.cell_width)
    }
}
