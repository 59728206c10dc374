//! Ground grid line pipeline

use bytemuck::{Pod, Zeroable};

use crate::voxel::Rgb;

const CENTER_LINE: Rgb = Rgb::from_hex(0x444444);
const GRID_LINE: Rgb = Rgb::from_hex(0x888888);

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Line-list vertices for a square grid on y = 0, centered on the origin.
///
/// Produces `divisions + 1` lines along each axis; the middle pair is darker
/// when `divisions` is even.
pub fn grid_vertices(size: f32, divisions: u32) -> Vec<GridVertex> {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size / 2.0;
    let center = CENTER_LINE.to_linear();
    let line = GRID_LINE.to_linear();

    let mut vertices = Vec::with_capacity(4 * (divisions as usize + 1));
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if divisions % 2 == 0 && i == divisions / 2 { center } else { line };
        vertices.extend_from_slice(&[
            GridVertex { position: [-half, 0.0, k], color },
            GridVertex { position: [half, 0.0, k], color },
            GridVertex { position: [k, 0.0, -half], color },
            GridVertex { position: [k, 0.0, half], color },
        ]);
    }
    vertices
}

/// Draws the ground grid
pub struct GridPipeline {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    vertex_count: u32,
}

impl GridPipeline {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        size: f32,
        divisions: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../../shaders/grid.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[camera_layout],
            immediate_size: 0,
        });

        let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GridVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let lines = grid_vertices(size, divisions);
        let vertices = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_vertices"),
            size: std::mem::size_of_val(lines.as_slice()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&vertices, 0, bytemuck::cast_slice(&lines));

        Self {
            pipeline,
            vertices,
            vertex_count: lines.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera_bind_group: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        // 20 divisions -> 21 lines per axis, 2 vertices each
        assert_eq!(grid_vertices(1000.0, 20).len(), 21 * 2 * 2);
    }

    #[test]
    fn test_lines_span_plane_on_ground() {
        let vertices = grid_vertices(1000.0, 20);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(vertices.iter().all(|v| v.position[0].abs() <= 500.0 && v.position[2].abs() <= 500.0));
        assert_eq!(vertices[0].position, [-500.0, 0.0, -500.0]);
        assert_eq!(vertices.last().map(|v| v.position), Some([500.0, 0.0, 500.0]));
    }

    #[test]
    fn test_center_lines_are_darker() {
        let vertices = grid_vertices(1000.0, 20);
        let center = CENTER_LINE.to_linear();
        let darker: Vec<_> = vertices.iter().filter(|v| v.color == center).collect();
        assert_eq!(darker.len(), 4);
        assert!(darker.iter().all(|v| v.position[0] == 0.0 || v.position[2] == 0.0));
    }

    #[test]
    fn test_odd_divisions_have_no_center_line() {
        let center = CENTER_LINE.to_linear();
        assert!(grid_vertices(900.0, 3).iter().all(|v| v.color != center));
    }
}
