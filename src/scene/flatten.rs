//! Flattened scene graph output for GPU upload.
//!
//! `FlatVoxelEntry` is one visible cube, laid out to be copied straight into the
//! instance buffer.

use bytemuck::{Pod, Zeroable};

use super::node::SceneNode;

/// One cube instance, ready for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FlatVoxelEntry {
    /// World-space center.
    pub position: [f32; 3],
    /// Edge length in world units.
    pub scale: f32,
    /// Linear RGB plus opacity.
    pub color: [f32; 4],
}

impl FlatVoxelEntry {
    pub fn from_node(node: &SceneNode) -> Self {
        let [r, g, b] = node.color.to_linear();
        Self {
            position: node.transform.position.to_array(),
            scale: node.transform.scale,
            color: [r, g, b, node.opacity],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::voxel::Rgb;

    #[test]
    fn test_entry_layout() {
        assert_eq!(std::mem::size_of::<FlatVoxelEntry>(), 32);
    }

    #[test]
    fn test_from_node() {
        let mut node = SceneNode::new(Vec3::new(25.0, 25.0, -25.0), 50.0, Rgb([255, 0, 0]));
        node.set_offset(10.0, 0.5);
        let entry = FlatVoxelEntry::from_node(&node);
        assert_eq!(entry.position, [25.0, 35.0, -25.0]);
        assert_eq!(entry.scale, 50.0);
        assert!((entry.color[0] - 1.0).abs() < 1e-5);
        assert_eq!(&entry.color[1..], &[0.0, 0.0, 0.5]);
    }
}
