//! Sandbox configuration, loaded from JSON

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::interaction::MaterialPolicy;
use crate::playback::{default_paths, InitialsPath};
use crate::voxel::{Material, Rgb};

/// Initial camera placement and projection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Point the camera looks at and orbits around
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [500.0, 800.0, 1300.0],
            target: [0.0, 0.0, 0.0],
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 10000.0,
        }
    }
}

impl CameraConfig {
    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }

    /// Build the configured camera for a viewport aspect ratio
    pub fn build(&self, aspect: f32) -> Camera {
        let mut camera = Camera::look_at(Vec3::from_array(self.position), self.target(), Vec3::Y)
            .with_projection(self.fov_y_degrees, self.near, self.far);
        camera.aspect = aspect;
        camera
    }
}

/// Everything a sandbox needs to start.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Edge length of one lattice cell in world units
    pub cell_width: f32,
    /// Edge length of the square ground plane
    pub plane_width: f32,
    /// Milliseconds between playback ticks
    pub tick_interval_ms: u64,
    /// Height voxels drop from and rise to; one cell when unset
    pub fall_height: Option<f32>,
    /// Vertical distance covered per frame; a tenth of a cell when unset
    pub fall_step: Option<f32>,
    /// Material for user and playback placements under the fixed policy
    pub material: Material,
    pub material_policy: MaterialPolicy,
    /// Roll-over preview cube color and opacity
    pub preview_color: Rgb,
    pub preview_opacity: f32,
    pub background_color: Rgb,
    /// Start typing initials as soon as the sandbox starts
    pub autoplay: bool,
    pub paths: Vec<InitialsPath>,
    pub camera: CameraConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            cell_width: 50.0,
            plane_width: 1000.0,
            tick_interval_ms: 200,
            fall_height: None,
            fall_step: None,
            material: Material::default(),
            material_policy: MaterialPolicy::Fixed,
            preview_color: Rgb::from_hex(0xff0000),
            preview_opacity: 0.5,
            background_color: Rgb::from_hex(0xf0f0f0),
            autoplay: true,
            paths: default_paths(),
            camera: CameraConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded sandbox config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn fall_height(&self) -> f32 {
        self.fall_height.unwrap_or(self.cell_width)
    }

    pub fn fall_step(&self) -> f32 {
        self.fall_step.unwrap_or(self.cell_width / 10.0)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject values the sandbox cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::Config(format!("{} must be positive and finite, got {}", name, value)))
            }
        }

        positive("cell_width", self.cell_width)?;
        positive("plane_width", self.plane_width)?;
        positive("fall_step", self.fall_step())?;
        let fall_height = self.fall_height();
        if !fall_height.is_finite() || fall_height < 0.0 {
            return Err(Error::Config(format!(
                "fall_height must be finite and non-negative, got {}",
                fall_height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.preview_opacity) {
            return Err(Error::Config(format!(
                "preview_opacity must be within [0, 1], got {}",
                self.preview_opacity
            )));
        }

        let camera = &self.camera;
        positive("camera.near", camera.near)?;
        if !(camera.far > camera.near) {
            return Err(Error::Config("camera.far must be beyond camera.near".into()));
        }
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(Error::Config(format!(
                "camera.fov_y_degrees must be within (0, 180), got {}",
                camera.fov_y_degrees
            )));
        }
        let position = Vec3::from_array(camera.position);
        let offset = camera.target() - position;
        if !offset.is_finite() || offset.length() <= f32::EPSILON {
            return Err(Error::Config("camera.position must differ from camera.target".into()));
        }
        // Looking straight up or down leaves no horizontal axis to orient by
        if offset.normalize().cross(Vec3::Y).length() < 1e-6 {
            return Err(Error::Config(
                "camera.position must not be directly above or below camera.target".into(),
            ));
        }
        Ok(())
    }
}
