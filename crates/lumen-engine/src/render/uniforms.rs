use bytemuck::{Pod, Zeroable};

use crate::shading::SurfaceEncoding;

/// Host mirror of the WGSL `Uniforms` block (group 0, binding 2).
///
/// Layout is fixed: `resolution` at offset 0, `srgb_surface` at offset 8,
/// padded to 16 bytes so the struct matches WGSL's size rounding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ResolutionUniform {
    /// Target size in pixels. Both components must be nonzero.
    pub resolution: [f32; 2],
    /// `0.0` = linear target, nonzero = sRGB target. See [`SurfaceEncoding`].
    pub srgb_surface: f32,
    pub _pad: f32,
}

const _: () = {
    assert!(std::mem::offset_of!(ResolutionUniform, resolution) == 0);
    assert!(std::mem::offset_of!(ResolutionUniform, srgb_surface) == 8);
    assert!(std::mem::size_of::<ResolutionUniform>() == 16);
};

impl ResolutionUniform {
    #[inline]
    pub fn new(resolution: [f32; 2], encoding: SurfaceEncoding) -> Self {
        debug_assert!(
            resolution[0] != 0.0 && resolution[1] != 0.0,
            "ResolutionUniform: zero resolution {resolution:?}"
        );
        Self {
            resolution,
            srgb_surface: encoding.to_flag(),
            _pad: 0.0,
        }
    }

    #[inline]
    pub fn encoding(&self) -> SurfaceEncoding {
        SurfaceEncoding::from_flag(self.srgb_surface)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Minimum binding size for layout entries referencing this block.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .unwrap_or(std::num::NonZeroU64::MIN)
    }
}

/// Uniform buffer holding a [`ResolutionUniform`], shared by every pass that
/// binds slot 2.
///
/// Rewritten only between frames (resize, surface reconfigure).
pub struct ResolutionBlock {
    data: ResolutionUniform,
    buffer: wgpu::Buffer,
}

impl ResolutionBlock {
    pub fn new(device: &wgpu::Device, resolution: [f32; 2], encoding: SurfaceEncoding) -> Self {
        let data = ResolutionUniform::new(clamp_resolution(resolution), encoding);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen resolution ubo"),
            size: std::mem::size_of::<ResolutionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: true,
        });
        buffer
            .slice(..)
            .get_mapped_range_mut()
            .copy_from_slice(data.as_bytes());
        buffer.unmap();

        Self { data, buffer }
    }

    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Updates the resolution; zero components are raised to one pixel.
    pub fn write_resolution(&mut self, queue: &wgpu::Queue, resolution: [f32; 2]) {
        self.data.resolution = clamp_resolution(resolution);
        queue.write_buffer(&self.buffer, 0, self.data.as_bytes());
        log::debug!("resolution uniform -> {:?}", self.data.resolution);
    }

    pub fn write_encoding(&mut self, queue: &wgpu::Queue, encoding: SurfaceEncoding) {
        self.data.srgb_surface = encoding.to_flag();
        queue.write_buffer(&self.buffer, 0, self.data.as_bytes());
    }
}

fn clamp_resolution(resolution: [f32; 2]) -> [f32; 2] {
    [resolution[0].max(1.0), resolution[1].max(1.0)]
}
