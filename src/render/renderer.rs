//! Frame rendering: ground grid, then sorted cube instances, in one pass

use crate::core::camera::Camera;
use crate::core::error::Error;
use crate::render::buffer::{CameraBuffer, InstanceBuffer, Lighting};
use crate::render::context::GpuContext;
use crate::render::pipeline::{GridPipeline, VoxelPipeline};
use crate::scene::{FlatVoxelEntry, SandboxConfig};
use crate::voxel::Rgb;

/// Linear clear color for a surface that encodes to sRGB
pub fn clear_color(rgb: Rgb) -> wgpu::Color {
    let [r, g, b] = rgb.to_linear();
    wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: 1.0 }
}

/// Owns every GPU resource needed to draw the sandbox
pub struct Renderer {
    camera: CameraBuffer,
    instances: InstanceBuffer,
    voxels: VoxelPipeline,
    grid: GridPipeline,
    background: wgpu::Color,
}

impl Renderer {
    pub fn new(gpu: &GpuContext, config: &SandboxConfig) -> Self {
        let camera = CameraBuffer::new(&gpu.device, Lighting::default());
        let voxels = VoxelPipeline::new(&gpu.device, &gpu.queue, gpu.format(), camera.bind_group_layout());
        let divisions = (config.plane_width / config.cell_width).round().max(1.0) as u32;
        let grid = GridPipeline::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            camera.bind_group_layout(),
            config.plane_width,
            divisions,
        );
        log::info!("Renderer ready ({:?}, {} grid divisions)", gpu.format(), divisions);

        Self {
            camera,
            instances: InstanceBuffer::new(&gpu.device),
            voxels,
            grid,
            background: clear_color(config.background_color),
        }
    }

    /// Draw one frame. `instances` must already be sorted far to near.
    pub fn render(&mut self, gpu: &GpuContext, camera: &Camera, instances: &[FlatVoxelEntry]) -> Result<(), Error> {
        let output = match gpu.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                // Lost or outdated surfaces recover after reconfiguring
                gpu.reconfigure();
                return Err(e);
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.camera.update(&gpu.queue, camera);
        self.instances.upload(&gpu.device, &gpu.queue, instances);

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.grid.draw(&mut pass, self.camera.bind_group());
            self.voxels.draw(&mut pass, self.camera.bind_group(), &self.instances);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
