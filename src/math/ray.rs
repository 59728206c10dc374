//! Ray type and intersection tests

use super::aabb::Aabb;
use crate::core::types::Vec3;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for slab tests
    pub inv_direction: Vec3,
}

/// Where a ray enters a surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// Outward unit normal of the surface at the hit
    pub normal: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Entry point of the ray into an AABB, with the normal of the entered face.
    ///
    /// A ray starting inside the box enters no face and yields `None`.
    pub fn enter_aabb(&self, aabb: &Aabb) -> Option<RayHit> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.max_element();
        let t_far = t_max.min_element();

        if t_near > t_far || t_near < 0.0 {
            return None;
        }

        // The slab that was entered last decides the face
        let axis = if t_near == t_min.x {
            0
        } else if t_near == t_min.y {
            1
        } else {
            2
        };
        let mut normal = Vec3::ZERO;
        normal[axis] = -self.direction[axis].signum();

        Some(RayHit { t: t_near, normal })
    }

    /// Hit against the upward face of the horizontal plane `y = height`.
    ///
    /// Rays parallel to the plane, pointing away from it, or arriving from below miss.
    pub fn enter_plane_y(&self, height: f32) -> Option<RayHit> {
        if self.direction.y >= 0.0 || self.origin.y < height {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        Some(RayHit { t, normal: Vec3::Y })
    }
}
