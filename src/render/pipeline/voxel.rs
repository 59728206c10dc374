//! Instanced cube pipeline

use bytemuck::{Pod, Zeroable};

use crate::render::buffer::InstanceBuffer;
use crate::scene::FlatVoxelEntry;

/// Unit cube corner, centered on the origin
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Build the 36 vertices of a unit cube, counter-clockwise seen from outside
pub fn cube_vertices() -> Vec<CubeVertex> {
    // (normal, u, v) with u x v == normal
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (-1.0, -1.0), (1.0, -1.0), (1.0, 1.0),
        (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        for (su, sv) in CORNERS {
            let position = std::array::from_fn(|i| 0.5 * (n[i] + su * u[i] + sv * v[i]));
            vertices.push(CubeVertex { position, normal: n });
        }
    }
    vertices
}

/// Draws every scene instance as a lit, alpha-blended cube
pub struct VoxelPipeline {
    pipeline: wgpu::RenderPipeline,
    cube: wgpu::Buffer,
    vertex_count: u32,
}

impl VoxelPipeline {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("voxel_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/voxel.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("voxel_pipeline_layout"),
            bind_group_layouts: &[camera_layout],
            immediate_size: 0,
        });

        let vertex_attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        let instance_attributes = wgpu::vertex_attr_array![2 => Float32x3, 3 => Float32, 4 => Float32x4];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("voxel_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CubeVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &vertex_attributes,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<FlatVoxelEntry>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &instance_attributes,
                    },
                ],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            // Instances arrive sorted far to near
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let vertices = cube_vertices();
        let cube = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cube_vertices"),
            size: std::mem::size_of_val(vertices.as_slice()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&cube, 0, bytemuck::cast_slice(&vertices));

        Self {
            pipeline,
            cube,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
        instances: &InstanceBuffer,
    ) {
        if instances.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.cube.slice(..));
        pass.set_vertex_buffer(1, instances.slice());
        pass.draw(0..self.vertex_count, 0..instances.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_cube_has_36_vertices_inside_unit_bounds() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn test_triangles_wind_outward() {
        for tri in cube_vertices().chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
            let face_normal = (b - a).cross(c - a).normalize();
            assert!((face_normal - Vec3::from(tri[0].normal)).length() < 1e-5);
        }
    }

    #[test]
    fn test_instance_stride_matches_attributes() {
        // vec3 + f32 + vec4
        assert_eq!(std::mem::size_of::<FlatVoxelEntry>(), 12 + 4 + 16);
    }
}
