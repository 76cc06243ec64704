use anyhow::Result;

use crate::render::binding::{self, TextureSlot};
use crate::render::shader::{PassShader, ShaderOverrides};
use crate::render::vertex::DepthVertex;
use crate::shading::{DepthAddressing, QuadWinding, FULLSCREEN_VERTEX_COUNT};

use super::{create_pipeline, require_bind_group, require_vertices, DrawInputs, PipelineDesc};

/// Where the depth view gets its vertices.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DepthVertexSource {
    /// Position-only vertex buffer at slot 0.
    Buffer,
    /// Generated from `vertex_index`; no buffer.
    Fullscreen(QuadWinding),
}

impl Default for DepthVertexSource {
    fn default() -> Self {
        DepthVertexSource::Fullscreen(QuadWinding::default())
    }
}

impl DepthVertexSource {
    fn vertex_entry(self) -> &'static str {
        match self {
            DepthVertexSource::Buffer => "vs_buffer",
            DepthVertexSource::Fullscreen(_) => "vs_fullscreen",
        }
    }

    fn winding(self) -> Option<QuadWinding> {
        match self {
            DepthVertexSource::Buffer => None,
            DepthVertexSource::Fullscreen(w) => Some(w),
        }
    }
}

fn fragment_entry(addressing: DepthAddressing) -> &'static str {
    match addressing {
        DepthAddressing::PerspectiveDivide => "fs_perspective",
        DepthAddressing::Resolution => "fs_resolution",
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DepthVisualizationConfig {
    pub source: DepthVertexSource,
    pub addressing: DepthAddressing,
    pub color_format: wgpu::TextureFormat,
}

impl DepthVisualizationConfig {
    pub fn new(color_format: wgpu::TextureFormat) -> Self {
        Self {
            source: DepthVertexSource::default(),
            addressing: DepthAddressing::default(),
            color_format,
        }
    }

    pub fn source(mut self, source: DepthVertexSource) -> Self {
        self.source = source;
        self
    }

    pub fn addressing(mut self, addressing: DepthAddressing) -> Self {
        self.addressing = addressing;
        self
    }
}

/// Grayscale preview of a depth attachment.
///
/// The depth texture is only sampled; the pass has no depth attachment.
pub struct DepthVisualizationPass {
    config: DepthVisualizationConfig,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl DepthVisualizationPass {
    pub fn new(device: &wgpu::Device, config: DepthVisualizationConfig) -> Self {
        let shader = PassShader::DepthView;
        let module = shader.create_module(device);

        let bind_group_layout = binding::create_layout(
            device,
            "lumen depth view bgl",
            TextureSlot::Depth,
            config.addressing.needs_uniform(),
        );

        let vertex_layout = [DepthVertex::layout()];
        let buffers: &[wgpu::VertexBufferLayout<'_>] = match config.source {
            DepthVertexSource::Buffer => &vertex_layout,
            DepthVertexSource::Fullscreen(_) => &[],
        };
        let winding = config.source.winding();

        let pipeline = create_pipeline(
            device,
            &PipelineDesc {
                label: "lumen depth view pipeline",
                module: &module,
                vs_entry: config.source.vertex_entry(),
                fs_entry: fragment_entry(config.addressing),
                buffers,
                bind_group_layout: Some(&bind_group_layout),
                color_format: config.color_format,
                front_face: winding.map_or(wgpu::FrontFace::Ccw, QuadWinding::front_face),
                cull_mode: winding.map(|_| wgpu::Face::Back),
                depth_write: false,
                overrides: ShaderOverrides {
                    color_transform: None,
                    winding,
                }
                .for_shader(shader),
            },
        );

        log::info!(
            "depth view pass ready: {:?}, {:?} addressing",
            config.source,
            config.addressing
        );

        Self {
            config,
            pipeline,
            bind_group_layout,
        }
    }

    #[inline]
    pub fn config(&self) -> &DepthVisualizationConfig {
        &self.config
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn record(&self, rpass: &mut wgpu::RenderPass<'_>, inputs: &DrawInputs<'_>) -> Result<()> {
        let label = "lumen depth view pass";
        let bind_group = require_bind_group(label, inputs)?;

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        match self.config.source {
            DepthVertexSource::Buffer => {
                let (vertices, count) = require_vertices(label, inputs)?;
                rpass.set_vertex_buffer(0, vertices.slice(..));
                rpass.draw(0..count, 0..1);
            }
            DepthVertexSource::Fullscreen(_) => {
                rpass.draw(0..FULLSCREEN_VERTEX_COUNT, 0..1);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_fullscreen_perspective() {
        let c = DepthVisualizationConfig::new(wgpu::TextureFormat::Rgba16Float);
        assert_eq!(c.source, DepthVertexSource::Fullscreen(QuadWinding::Clockwise));
        assert_eq!(c.addressing, DepthAddressing::PerspectiveDivide);
    }

    #[test]
    fn entries_exist_in_module() {
        let src = PassShader::DepthView.source();
        let sources = [
            DepthVertexSource::Buffer,
            DepthVertexSource::Fullscreen(QuadWinding::CounterClockwise),
        ];
        for source in sources {
            assert!(src.contains(&format!("fn {}(", source.vertex_entry())));
        }
        for addressing in [DepthAddressing::PerspectiveDivide, DepthAddressing::Resolution] {
            assert!(src.contains(&format!("fn {}(", fragment_entry(addressing))));
        }
    }

    #[test]
    fn buffer_source_sets_no_winding_override() {
        assert_eq!(DepthVertexSource::Buffer.winding(), None);
        assert_eq!(
            DepthVertexSource::Fullscreen(QuadWinding::CounterClockwise).winding(),
            Some(QuadWinding::CounterClockwise)
        );
    }
}
