//! Scene graph: the drawable side of the sandbox.
//!
//! Holds one cube per live voxel, keyed by the same `VoxelId` the occupancy
//! store uses, plus the roll-over preview cube. `flatten()` produces the
//! instance list for the renderer, sorted back to front so translucent cubes
//! blend over what is behind them.

use std::collections::HashMap;

use crate::core::types::Vec3;
use crate::voxel::{Rgb, VoxelId};

use super::flatten::FlatVoxelEntry;
use super::node::SceneNode;

/// CPU-side scene of voxel cubes.
pub struct SceneGraph {
    nodes: HashMap<VoxelId, SceneNode>,
    preview: SceneNode,
    cell_width: f32,
    render_requested: bool,
}

impl SceneGraph {
    /// Create an empty scene with a hidden preview cube.
    pub fn new(cell_width: f32, preview_color: Rgb, preview_opacity: f32) -> Self {
        let mut preview = SceneNode::new(Vec3::ZERO, cell_width, preview_color);
        preview.opacity = preview_opacity.clamp(0.0, 1.0);
        preview.visible = false;

        Self {
            nodes: HashMap::new(),
            preview,
            cell_width,
            render_requested: true,
        }
    }

    /// Add a cube for a voxel resting at `center`. Replaces any existing cube for the id.
    pub fn add_voxel(&mut self, id: VoxelId, center: Vec3, color: Rgb) {
        self.nodes.insert(id, SceneNode::new(center, self.cell_width, color));
        self.render_requested = true;
    }

    /// Display a voxel `offset` above its resting position. Unknown ids are ignored.
    pub fn set_offset(&mut self, id: VoxelId, offset: f32, opacity: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_offset(offset, opacity);
            self.render_requested = true;
        }
    }

    /// Remove a voxel's cube. Returns false if there was none.
    pub fn remove_voxel(&mut self, id: VoxelId) -> bool {
        let removed = self.nodes.remove(&id).is_some();
        if removed {
            self.render_requested = true;
        }
        removed
    }

    /// Move the preview cube to a cell center, or hide it.
    pub fn set_preview(&mut self, center: Option<Vec3>) {
        match center {
            Some(center) => {
                self.preview.rest_position = center;
                self.preview.transform.position = center;
                self.preview.visible = true;
            }
            None => self.preview.visible = false,
        }
        self.render_requested = true;
    }

    /// Preview cube position, if shown.
    pub fn preview(&self) -> Option<Vec3> {
        self.preview.visible.then_some(self.preview.transform.position)
    }

    /// Get a voxel's node.
    pub fn get(&self, id: VoxelId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: VoxelId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of voxel cubes (the preview is not counted).
    pub fn voxel_count(&self) -> usize {
        self.nodes.len()
    }

    /// Remove every voxel cube.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.render_requested = true;
    }

    /// Ask for a frame to be drawn.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Consume the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Collect every visible cube, farthest from `eye` first.
    pub fn flatten(&self, eye: Vec3) -> Vec<FlatVoxelEntry> {
        let mut visible: Vec<(f32, FlatVoxelEntry)> = self
            .nodes
            .values()
            .chain(std::iter::once(&self.preview))
            .filter(|node| node.visible && node.opacity > 0.0)
            .map(|node| {
                let distance = node.transform.position.distance_squared(eye);
                (distance, FlatVoxelEntry::from_node(node))
            })
            .collect();

        visible.sort_by(|a, b| b.0.total_cmp(&a.0));
        visible.into_iter().map(|(_, entry)| entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orange() -> Rgb {
        Rgb::from_hex(0xfeb74c)
    }

    fn scene() -> SceneGraph {
        let mut scene = SceneGraph::new(50.0, Rgb::from_hex(0xff0000), 0.5);
        scene.take_render_request();
        scene
    }

    #[test]
    fn test_new_scene_requests_first_frame() {
        let mut scene = SceneGraph::new(50.0, Rgb::from_hex(0xff0000), 0.5);
        assert!(scene.take_render_request());
        assert!(!scene.take_render_request());
        assert_eq!(scene.preview(), None);
    }

    #[test]
    fn test_add_and_remove_request_render() {
        let mut scene = scene();
        scene.add_voxel(VoxelId(1), Vec3::splat(25.0), orange());
        assert!(scene.take_render_request());
        assert_eq!(scene.voxel_count(), 1);

        assert!(scene.remove_voxel(VoxelId(1)));
        assert!(scene.take_render_request());
        assert!(!scene.remove_voxel(VoxelId(1)));
        assert!(!scene.take_render_request());
    }

    #[test]
    fn test_set_offset_unknown_is_ignored() {
        let mut scene = scene();
        scene.set_offset(VoxelId(9), 10.0, 1.0);
        assert!(!scene.take_render_request());
    }

    #[test]
    fn test_flatten_sorts_back_to_front() {
        let mut scene = scene();
        scene.add_voxel(VoxelId(1), Vec3::new(25.0, 25.0, 25.0), orange());
        scene.add_voxel(VoxelId(2), Vec3::new(25.0, 25.0, -475.0), orange());
        scene.add_voxel(VoxelId(3), Vec3::new(25.0, 25.0, -225.0), orange());

        let entries = scene.flatten(Vec3::new(25.0, 25.0, 500.0));
        let z: Vec<f32> = entries.iter().map(|e| e.position[2]).collect();
        assert_eq!(z, vec![-475.0, -225.0, 25.0]);
    }

    #[test]
    fn test_flatten_includes_visible_preview() {
        let mut scene = scene();
        scene.add_voxel(VoxelId(1), Vec3::splat(25.0), orange());
        assert_eq!(scene.flatten(Vec3::ZERO).len(), 1);

        scene.set_preview(Some(Vec3::new(75.0, 25.0, 25.0)));
        let entries = scene.flatten(Vec3::new(0.0, 500.0, 0.0));
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.color[3] == 0.5));

        scene.set_preview(None);
        assert_eq!(scene.flatten(Vec3::ZERO).len(), 1);
    }

    #[test]
    fn test_fully_faded_cube_is_skipped() {
        let mut scene = scene();
        scene.add_voxel(VoxelId(1), Vec3::splat(25.0), orange());
        scene.set_offset(VoxelId(1), 50.0, 0.0);
        assert!(scene.flatten(Vec3::ZERO).is_empty());
    }
}
