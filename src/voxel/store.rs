//! Occupancy store: the set of live voxels, indexed by id and by cell

use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::voxel::grid::GridCell;
use crate::voxel::voxel::{Material, Voxel, VoxelId};

/// Live voxels with a forward (id) and reverse (cell) index kept in lockstep.
///
/// At most one voxel occupies a cell.
pub struct OccupancyStore {
    voxels: HashMap<VoxelId, Voxel>,
    cells: HashMap<GridCell, VoxelId>,
    next_id: u64,
}

impl OccupancyStore {
    pub fn new() -> Self {
        Self {
            voxels: HashMap::new(),
            cells: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a voxel in an empty cell.
    ///
    /// An occupied cell is rejected with `Error::CellOccupied` and the store is left unchanged.
    pub fn place(&mut self, cell: GridCell, material: Material) -> Result<VoxelId> {
        if self.cells.contains_key(&cell) {
            return Err(Error::CellOccupied(cell));
        }

        let id = VoxelId(self.next_id);
        self.next_id += 1;

        self.voxels.insert(id, Voxel {
            id,
            cell,
            material,
            is_animating: false,
        });
        self.cells.insert(cell, id);
        log::debug!("Placed voxel {} at {}", id, cell);
        Ok(id)
    }

    /// Remove a voxel. Unknown ids are a no-op.
    pub fn remove(&mut self, id: VoxelId) -> Option<Voxel> {
        let Some(voxel) = self.voxels.remove(&id) else {
            log::debug!("Remove of unknown voxel {} ignored", id);
            return None;
        };
        self.cells.remove(&voxel.cell);
        log::debug!("Removed voxel {} from {}", id, voxel.cell);
        Some(voxel)
    }

    /// Id of the voxel occupying a cell
    pub fn find_at(&self, cell: GridCell) -> Option<VoxelId> {
        self.cells.get(&cell).copied()
    }

    pub fn get(&self, id: VoxelId) -> Option<&Voxel> {
        self.voxels.get(&id)
    }

    pub fn contains(&self, id: VoxelId) -> bool {
        self.voxels.contains_key(&id)
    }

    /// All live voxels, in no particular order
    pub fn all(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.values()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Mark a voxel as animating or at rest. Returns false for unknown ids.
    pub fn set_animating(&mut self, id: VoxelId, animating: bool) -> bool {
        match self.voxels.get_mut(&id) {
            Some(voxel) => {
                voxel.is_animating = animating;
                true
            }
            None => false,
        }
    }

    /// Remove every voxel, returning how many there were. Ids keep counting up.
    pub fn clear(&mut self) -> usize {
        let count = self.voxels.len();
        self.voxels.clear();
        self.cells.clear();
        count
    }

    /// Check that both indices describe the same set of voxels
    pub fn check_consistency(&self) -> bool {
        self.voxels.len() == self.cells.len()
            && self.voxels.iter().all(|(id, voxel)| {
                voxel.id == *id && self.cells.get(&voxel.cell) == Some(id)
            })
    }
}

impl Default for OccupancyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32, z: i32) -> GridCell {
        GridCell::new(x, y, z)
    }

    #[test]
    fn test_place_then_find() {
        let mut store = OccupancyStore::new();
        let id = store.place(cell(1, 0, 2), Material::default()).unwrap();

        assert_eq!(store.find_at(cell(1, 0, 2)), Some(id));
        assert_eq!(store.get(id).unwrap().cell, cell(1, 0, 2));
        assert_eq!(store.len(), 1);
        assert!(store.check_consistency());
    }

    #[test]
    fn test_place_then_remove_restores_store() {
        let mut store = OccupancyStore::new();
        let keep = store.place(cell(0, 0, 0), Material::default()).unwrap();
        let id = store.place(cell(3, 1, -4), Material::default()).unwrap();

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.cell, cell(3, 1, -4));
        assert_eq!(store.find_at(cell(3, 1, -4)), None);
        assert_eq!(store.len(), 1);
        assert!(store.contains(keep));
        assert!(store.check_consistency());
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut store = OccupancyStore::new();
        let first = store.place(cell(0, 0, 0), Material::default()).unwrap();

        let err = store.place(cell(0, 0, 0), Material::default()).unwrap_err();
        assert!(matches!(err, Error::CellOccupied(c) if c == cell(0, 0, 0)));
        assert_eq!(store.find_at(cell(0, 0, 0)), Some(first));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = OccupancyStore::new();
        let id = store.place(cell(0, 0, 0), Material::default()).unwrap();
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.remove(VoxelId(999)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = OccupancyStore::new();
        let a = store.place(cell(0, 0, 0), Material::default()).unwrap();
        store.remove(a);
        let b = store.place(cell(0, 0, 0), Material::default()).unwrap();
        store.clear();
        let c = store.place(cell(0, 0, 0), Material::default()).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_set_animating() {
        let mut store = OccupancyStore::new();
        let id = store.place(cell(0, 0, 0), Material::default()).unwrap();
        assert!(!store.get(id).unwrap().is_animating);
        assert!(store.set_animating(id, true));
        assert!(store.get(id).unwrap().is_animating);
        assert!(!store.set_animating(VoxelId(42), true));
    }

    #[test]
    fn test_no_shared_cells_after_mixed_operations() {
        let mut store = OccupancyStore::new();
        let mut ids = Vec::new();
        for i in 0..20 {
            // Cells repeat every seven placements
            let c = cell(i % 7, 0, 0);
            if let Ok(id) = store.place(c, Material::default()) {
                ids.push(id);
            }
            if i % 5 == 4 {
                if let Some(id) = ids.pop() {
                    store.remove(id);
                }
            }
            assert!(store.check_consistency());
        }
        let mut cells: Vec<_> = store.all().map(|v| v.cell).collect();
        let total = cells.len();
        cells.sort_by_key(|c| (c.x, c.y, c.z));
        cells.dedup();
        assert_eq!(cells.len(), total);
    }

    #[test]
    fn test_clear() {
        let mut store = OccupancyStore::new();
        store.place(cell(0, 0, 0), Material::default()).unwrap();
        store.place(cell(1, 0, 0), Material::default()).unwrap();
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.find_at(cell(1, 0, 0)), None);
        assert!(store.check_consistency());
    }
}
