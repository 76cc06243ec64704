//! Render passes.
//!
//! Each pass is built once (pipeline + bind group layout + config) and never
//! mutated afterwards. Bound resources live with the host, which rebuilds bind
//! groups when textures are recreated and hands them in through [`DrawInputs`].
//!
//! Convention:
//! - group 0 follows the contract in `render::binding`
//! - variant tags are pipeline overrides, fixed at construction

mod depth_view;
mod mesh;
mod present;

pub use depth_view::{DepthVertexSource, DepthVisualizationConfig, DepthVisualizationPass};
pub use mesh::{MeshPass, MeshPassConfig, MeshShading};
pub use present::{PresentConfig, PresentPass};

use anyhow::{ensure, Result};

use super::binding::BindingSet;
use super::shader::ShaderOverrides;
use super::texture::DEPTH_FORMAT;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PassKind {
    Mesh,
    DepthVisualization,
    Present,
}

impl PassKind {
    pub fn label(self) -> &'static str {
        match self {
            PassKind::Mesh => "lumen mesh pass",
            PassKind::DepthVisualization => "lumen depth view pass",
            PassKind::Present => "lumen present pass",
        }
    }
}

/// Per-draw inputs owned by the host.
#[derive(Copy, Clone, Default)]
pub struct DrawInputs<'a> {
    pub bind_group: Option<&'a wgpu::BindGroup>,
    pub vertex_buffer: Option<&'a wgpu::Buffer>,
    /// Ignored by passes that generate their own vertices.
    pub vertex_count: u32,
}

impl<'a> DrawInputs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_group(mut self, bind_group: &'a wgpu::BindGroup) -> Self {
        self.bind_group = Some(bind_group);
        self
    }

    pub fn vertices(mut self, buffer: &'a wgpu::Buffer, count: u32) -> Self {
        self.vertex_buffer = Some(buffer);
        self.vertex_count = count;
        self
    }
}

/// Any of the three pass variants, dispatched by the host's pipeline selection.
pub enum RenderPass {
    Mesh(MeshPass),
    DepthVisualization(DepthVisualizationPass),
    Present(PresentPass),
}

impl RenderPass {
    pub fn kind(&self) -> PassKind {
        match self {
            RenderPass::Mesh(_) => PassKind::Mesh,
            RenderPass::DepthVisualization(_) => PassKind::DepthVisualization,
            RenderPass::Present(_) => PassKind::Present,
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// `None` when the pass binds nothing (untextured mesh).
    pub fn bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        match self {
            RenderPass::Mesh(p) => p.bind_group_layout(),
            RenderPass::DepthVisualization(p) => Some(p.bind_group_layout()),
            RenderPass::Present(p) => Some(p.bind_group_layout()),
        }
    }

    /// Whether bind groups for this pass must carry the resolution uniform.
    pub fn needs_uniform(&self) -> bool {
        match self {
            RenderPass::Mesh(_) => false,
            RenderPass::DepthVisualization(p) => p.config().addressing.needs_uniform(),
            RenderPass::Present(_) => true,
        }
    }

    /// Builds a group 0 bind group against this pass's layout.
    ///
    /// Returns `Ok(None)` for passes without bindings. The uniform in `set` is
    /// dropped when the pass does not declare binding 2.
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        set: BindingSet<'_>,
    ) -> Result<Option<wgpu::BindGroup>> {
        let Some(layout) = self.bind_group_layout() else {
            return Ok(None);
        };
        let set = if self.needs_uniform() {
            ensure!(set.uniform.is_some(), "{}: resolution uniform missing", self.label());
            set
        } else {
            BindingSet { uniform: None, ..set }
        };
        Ok(Some(set.create(device, layout, self.label())))
    }

    /// Records the pass's single draw call into `rpass`.
    pub fn record(&self, rpass: &mut wgpu::RenderPass<'_>, inputs: &DrawInputs<'_>) -> Result<()> {
        match self {
            RenderPass::Mesh(p) => p.record(rpass, inputs),
            RenderPass::DepthVisualization(p) => p.record(rpass, inputs),
            RenderPass::Present(p) => p.record(rpass, inputs),
        }
    }
}

impl From<MeshPass> for RenderPass {
    fn from(p: MeshPass) -> Self {
        RenderPass::Mesh(p)
    }
}

impl From<DepthVisualizationPass> for RenderPass {
    fn from(p: DepthVisualizationPass) -> Self {
        RenderPass::DepthVisualization(p)
    }
}

impl From<PresentPass> for RenderPass {
    fn from(p: PresentPass) -> Self {
        RenderPass::Present(p)
    }
}

// ── pipeline assembly ─────────────────────────────────────────────────────

struct PipelineDesc<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs_entry: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    bind_group_layout: Option<&'a wgpu::BindGroupLayout>,
    color_format: wgpu::TextureFormat,
    front_face: wgpu::FrontFace,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    overrides: ShaderOverrides,
}

fn create_pipeline(device: &wgpu::Device, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let bind_group_layouts: Vec<&wgpu::BindGroupLayout> =
        desc.bind_group_layout.into_iter().collect();
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &bind_group_layouts,
        immediate_size: 0,
    });

    let constants = desc.overrides.constants();
    let compilation_options = || wgpu::PipelineCompilationOptions {
        constants: &constants,
        ..Default::default()
    };

    let depth_stencil = desc.depth_write.then(|| wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some(desc.vs_entry),
            compilation_options: compilation_options(),
            buffers: desc.buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some(desc.fs_entry),
            compilation_options: compilation_options(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: desc.front_face,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil,
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

fn require_bind_group<'a>(label: &str, inputs: &DrawInputs<'a>) -> Result<&'a wgpu::BindGroup> {
    inputs
        .bind_group
        .ok_or_else(|| anyhow::anyhow!("{label}: no bind group supplied"))
}

fn require_vertices<'a>(label: &str, inputs: &DrawInputs<'a>) -> Result<(&'a wgpu::Buffer, u32)> {
    let Some(buffer) = inputs.vertex_buffer else {
        anyhow::bail!("{label}: no vertex buffer supplied");
    };
    ensure!(inputs.vertex_count > 0, "{label}: empty vertex range");
    Ok((buffer, inputs.vertex_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_are_distinct() {
        let labels = [PassKind::Mesh, PassKind::DepthVisualization, PassKind::Present]
            .map(PassKind::label);
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[1], labels[2]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn missing_inputs_are_reported() {
        let inputs = DrawInputs::new();
        let err = require_bind_group("p", &inputs).unwrap_err();
        assert!(err.to_string().contains("no bind group"));
        let err = require_vertices("p", &inputs).unwrap_err();
        assert!(err.to_string().contains("no vertex buffer"));
    }
}
