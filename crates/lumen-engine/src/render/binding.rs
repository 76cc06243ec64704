//! Group 0 binding contract shared by every pass.
//!
//! - binding 0: texture (RGBA color, or depth-only for the depth view)
//! - binding 1: the sampler paired with it
//! - binding 2: [`ResolutionUniform`](super::uniforms::ResolutionUniform), where present

use super::uniforms::ResolutionUniform;

pub const TEXTURE_BINDING: u32 = 0;
pub const SAMPLER_BINDING: u32 = 1;
pub const UNIFORM_BINDING: u32 = 2;

/// Which kind of texture sits at binding 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureSlot {
    Color,
    Depth,
}

impl TextureSlot {
    /// Depth textures may only be read through a non-filtering sampler.
    pub fn sampler_type(self) -> wgpu::SamplerBindingType {
        match self {
            TextureSlot::Color => wgpu::SamplerBindingType::Filtering,
            TextureSlot::Depth => wgpu::SamplerBindingType::NonFiltering,
        }
    }

    fn sample_type(self) -> wgpu::TextureSampleType {
        match self {
            TextureSlot::Color => wgpu::TextureSampleType::Float { filterable: true },
            TextureSlot::Depth => wgpu::TextureSampleType::Depth,
        }
    }
}

pub fn texture_entry(slot: TextureSlot) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: TEXTURE_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: slot.sample_type(),
        },
        count: None,
    }
}

pub fn sampler_entry(ty: wgpu::SamplerBindingType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: SAMPLER_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(ty),
        count: None,
    }
}

pub fn uniform_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: UNIFORM_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(ResolutionUniform::min_binding_size()),
        },
        count: None,
    }
}

/// Layout entries for a texture/sampler pair, optionally followed by the uniform.
pub fn layout_entries(slot: TextureSlot, with_uniform: bool) -> Vec<wgpu::BindGroupLayoutEntry> {
    let mut entries = vec![texture_entry(slot), sampler_entry(slot.sampler_type())];
    if with_uniform {
        entries.push(uniform_entry());
    }
    entries
}

pub fn create_layout(
    device: &wgpu::Device,
    label: &str,
    slot: TextureSlot,
    with_uniform: bool,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &layout_entries(slot, with_uniform),
    })
}

/// Resources for one group 0 bind group.
///
/// `uniform` must be set exactly when the layout was built `with_uniform`.
#[derive(Copy, Clone)]
pub struct BindingSet<'a> {
    pub view: &'a wgpu::TextureView,
    pub sampler: &'a wgpu::Sampler,
    pub uniform: Option<&'a wgpu::Buffer>,
}

impl<'a> BindingSet<'a> {
    pub fn new(view: &'a wgpu::TextureView, sampler: &'a wgpu::Sampler) -> Self {
        Self { view, sampler, uniform: None }
    }

    pub fn with_uniform(mut self, buffer: &'a wgpu::Buffer) -> Self {
        self.uniform = Some(buffer);
        self
    }

    pub fn create(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> wgpu::BindGroup {
        let mut entries = vec![
            wgpu::BindGroupEntry {
                binding: TEXTURE_BINDING,
                resource: wgpu::BindingResource::TextureView(self.view),
            },
            wgpu::BindGroupEntry {
                binding: SAMPLER_BINDING,
                resource: wgpu::BindingResource::Sampler(self.sampler),
            },
        ];
        if let Some(buffer) = self.uniform {
            entries.push(wgpu::BindGroupEntry {
                binding: UNIFORM_BINDING,
                resource: buffer.as_entire_binding(),
            });
        }

        log::debug!("creating bind group {label:?} ({} entries)", entries.len());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &entries,
        })
    }
}
