//! Growable vertex buffer of cube instances

use crate::scene::FlatVoxelEntry;

/// Smallest allocation, in instances
const MIN_CAPACITY: usize = 64;

/// Instance buffer that reallocates at the next power of two when it overflows
pub struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: Self::allocate(device, MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voxel_instances"),
            size: (capacity * std::mem::size_of::<FlatVoxelEntry>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the buffer contents, growing it if needed
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[FlatVoxelEntry]) {
        let needed = grown_capacity(self.capacity, instances.len());
        if needed != self.capacity {
            log::debug!("Growing instance buffer {} -> {}", self.capacity, needed);
            self.buffer = Self::allocate(device, needed);
            self.capacity = needed;
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }

    /// Number of instances from the last upload
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

/// Capacity able to hold `len` instances, never shrinking
fn grown_capacity(current: usize, len: usize) -> usize {
    if len <= current {
        current
    } else {
        len.next_power_of_two().max(MIN_CAPACITY)
    }
}
