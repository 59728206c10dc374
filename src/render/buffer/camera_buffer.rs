//! GPU uniform buffer for camera and lighting data

use bytemuck::{Pod, Zeroable};
use crate::core::camera::Camera;
use crate::core::types::Vec3;

/// Fixed scene lighting: one ambient term plus one directional light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Linear ambient color, already scaled by its intensity
    pub ambient: Vec3,
    /// Direction towards the light
    pub direction: Vec3,
    /// Diffuse intensity of the directional light
    pub intensity: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        // 0x606060 ambient at intensity 3, white key light at intensity 3 (Lambert 1/pi folded in)
        let grey = crate::voxel::Rgb::from_hex(0x606060).to_linear()[0];
        Self {
            ambient: Vec3::splat(grey * 3.0),
            direction: Vec3::new(1.0, 0.75, 0.5).normalize(),
            intensity: 3.0 / std::f32::consts::PI,
        }
    }
}

/// Camera uniform data for GPU (must match shader struct exactly)
/// WGSL vec3 has 16-byte alignment, so we need explicit padding
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix (64 bytes, offset 0)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space (12 bytes, offset 64)
    pub position: [f32; 3],
    /// Padding after position for vec3 alignment (4 bytes, offset 76)
    pub _pos_pad: f32,
    /// Direction towards the key light (12 bytes, offset 80)
    pub light_dir: [f32; 3],
    /// Key light intensity (4 bytes, offset 92)
    pub light_intensity: f32,
    /// Ambient color (12 bytes, offset 96)
    pub ambient: [f32; 3],
    /// Final padding to 112 bytes (4 bytes, offset 108)
    pub _pad: f32,
}

impl CameraUniform {
    pub fn new(camera: &Camera, lighting: &Lighting) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: camera.position.to_array(),
            _pos_pad: 0.0,
            light_dir: lighting.direction.to_array(),
            light_intensity: lighting.intensity,
            ambient: lighting.ambient.to_array(),
            _pad: 0.0,
        }
    }
}

/// GPU buffer for camera uniform
pub struct CameraBuffer {
    /// Uniform buffer
    buffer: wgpu::Buffer,
    /// Bind group layout
    bind_group_layout: wgpu::BindGroupLayout,
    /// Bind group
    bind_group: wgpu::BindGroup,
    lighting: Lighting,
}

impl CameraBuffer {
    /// Create new camera buffer
    pub fn new(device: &wgpu::Device, lighting: Lighting) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniform"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            lighting,
        }
    }

    /// Update buffer with camera data
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera) {
        let uniform = CameraUniform::new(camera, &self.lighting);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Get bind group layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Get bind group
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
