//! Orbit camera controller

use crate::core::camera::Camera;
use crate::core::input::InputState;
use crate::core::types::Vec3;
use winit::event::MouseButton;

/// Lowest and highest pitch, kept above the ground plane and short of the pole
const PITCH_LIMITS: (f32, f32) = (0.05, 1.5);

/// Orbit controller: right-drag rotates around a target, scroll zooms
pub struct OrbitCameraController {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Radians per pixel of drag
    pub sensitivity: f32,
    /// Fraction of the distance covered per scroll line
    pub zoom_speed: f32,
    /// Allowed distance range
    pub min_distance: f32,
    pub max_distance: f32,
    distance: f32,
    /// Rotation around Y, zero looking down -Z
    yaw: f32,
    /// Elevation above the XZ plane
    pitch: f32,
}

impl OrbitCameraController {
    /// Create a controller that reproduces the camera's current placement around `target`
    pub fn from_camera(camera: &Camera, target: Vec3) -> Self {
        let offset = camera.position - target;
        let distance = offset.length().max(1.0);
        Self {
            target,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            min_distance: 100.0,
            max_distance: 5000.0,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
        }
    }

    /// Update camera based on input. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut Camera, input: &InputState) -> bool {
        let mut moved = false;

        if input.is_mouse_button_pressed(MouseButton::Right) {
            let (dx, dy) = input.drag_delta();
            if dx != 0.0 || dy != 0.0 {
                self.yaw -= dx * self.sensitivity;
                self.pitch = (self.pitch + dy * self.sensitivity)
                    .clamp(PITCH_LIMITS.0, PITCH_LIMITS.1);
                moved = true;
            }
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.distance = (self.distance * (1.0 - scroll * self.zoom_speed))
                .clamp(self.min_distance, self.max_distance);
            moved = true;
        }

        if moved {
            self.apply(camera);
        }
        moved
    }

    /// Place the camera at the controller's orbit position, facing the target
    pub fn apply(&self, camera: &mut Camera) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        camera.position = self.target + offset * self.distance;
        camera.face(self.target, Vec3::Y);
    }

    /// Current distance from the target
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Get current yaw
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
