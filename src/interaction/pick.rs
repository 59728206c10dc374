//! Pointer ray resolution against the ground plane and placed voxels

use crate::core::types::Vec3;
use crate::math::Ray;
use crate::voxel::{GridCell, Lattice, Voxel, VoxelId};

/// What a pick ray struck
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Ground,
    Voxel(VoxelId),
}

/// Nearest surface along a pick ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickResult {
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Outward normal of the struck face
    pub normal: Vec3,
    pub target: PickTarget,
}

impl PickResult {
    /// Cell a new voxel would occupy if placed at this hit.
    ///
    /// On a voxel this is the neighbor across the struck face. On the ground it is
    /// the cell under the hit point in layer zero.
    pub fn placement_cell(&self, lattice: &Lattice) -> GridCell {
        match self.target {
            PickTarget::Voxel(_) => {
                lattice.snap_to_cell(self.point + self.normal * (lattice.cell_width() * 0.5))
            }
            PickTarget::Ground => {
                let cell = lattice.snap_to_cell(self.point);
                GridCell::new(cell.x, 0, cell.z)
            }
        }
    }

    /// Voxel that would be removed by this hit. The ground is never removable.
    pub fn removal_target(&self) -> Option<VoxelId> {
        match self.target {
            PickTarget::Voxel(id) => Some(id),
            PickTarget::Ground => None,
        }
    }
}

/// Resolves pick rays against a finite ground square and voxel cells
#[derive(Clone, Copy, Debug)]
pub struct RayPicker {
    lattice: Lattice,
    half_plane_width: f32,
}

impl RayPicker {
    /// `plane_width` is the edge length of the ground square centered at the origin
    pub fn new(lattice: Lattice, plane_width: f32) -> Self {
        Self {
            lattice,
            half_plane_width: plane_width * 0.5,
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Nearest hit among the ground and the given voxels, tested at their resting cells.
    ///
    /// Callers pass only pick-eligible voxels.
    pub fn pick<'a>(
        &self,
        ray: &Ray,
        voxels: impl IntoIterator<Item = &'a Voxel>,
    ) -> Option<PickResult> {
        let mut nearest: Option<PickResult> = None;

        for voxel in voxels {
            let bounds = self.lattice.cell_bounds(voxel.cell);
            if let Some(hit) = ray.enter_aabb(&bounds) {
                if nearest.is_none_or(|n| hit.t < n.t) {
                    nearest = Some(PickResult {
                        t: hit.t,
                        point: ray.at(hit.t),
                        normal: hit.normal,
                        target: PickTarget::Voxel(voxel.id),
                    });
                }
            }
        }

        if let Some(hit) = ray.enter_plane_y(0.0) {
            let point = ray.at(hit.t);
            let on_plane = point.x.abs() <= self.half_plane_width
                && point.z.abs() <= self.half_plane_width;
            if on_plane && nearest.is_none_or(|n| hit.t < n.t) {
                nearest = Some(PickResult {
                    t: hit.t,
                    point,
                    normal: hit.normal,
                    target: PickTarget::Ground,
                });
            }
        }

        nearest
    }
}
