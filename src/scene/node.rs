//! Scene graph node types
//!
//! Drawable cubes: a resting position plus the transient offset and opacity
//! applied by transitions.

use crate::core::types::Vec3;
use crate::voxel::Rgb;

/// Local transform of a cube drawable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    /// Cube edge length in world units
    pub scale: f32,
}

impl LocalTransform {
    /// Create a transform for a cube of edge `scale` centered on `position`.
    pub fn new(position: Vec3, scale: f32) -> Self {
        Self { position, scale }
    }
}

/// A single cube in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    /// Cell center the cube rests on
    pub rest_position: Vec3,
    pub transform: LocalTransform,
    pub color: Rgb,
    pub opacity: f32,
    pub visible: bool,
}

impl SceneNode {
    /// Create a solid, visible node resting at `position`.
    pub fn new(position: Vec3, scale: f32, color: Rgb) -> Self {
        Self {
            rest_position: position,
            transform: LocalTransform::new(position, scale),
            color,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Display the node `offset` above its resting position.
    pub fn set_offset(&mut self, offset: f32, opacity: f32) {
        self.transform.position = self.rest_position + Vec3::Y * offset;
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Vertical displacement from the resting position
    pub fn offset(&self) -> f32 {
        self.transform.position.y - self.rest_position.y
    }
}
