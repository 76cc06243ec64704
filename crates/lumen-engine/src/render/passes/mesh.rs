use anyhow::Result;

use crate::render::binding::{self, TextureSlot};
use crate::render::shader::{PassShader, ShaderOverrides};
use crate::render::vertex::MeshVertex;
use crate::shading::ColorTransform;

use super::{create_pipeline, require_bind_group, require_vertices, DrawInputs, PipelineDesc};

/// Whether the mesh samples a diffuse texture or fills with the debug color.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum MeshShading {
    #[default]
    Textured,
    /// No bindings; vertex color is ignored.
    DebugColor,
}

impl MeshShading {
    fn fragment_entry(self) -> &'static str {
        match self {
            MeshShading::Textured => "fs_textured",
            MeshShading::DebugColor => "fs_debug_color",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshPassConfig {
    pub shading: MeshShading,
    /// Applied unconditionally, no uniform involved.
    pub transform: ColorTransform,
    pub color_format: wgpu::TextureFormat,
}

impl MeshPassConfig {
    pub fn new(color_format: wgpu::TextureFormat) -> Self {
        Self {
            shading: MeshShading::Textured,
            transform: ColorTransform::ApproxLinearize,
            color_format,
        }
    }

    pub fn shading(mut self, shading: MeshShading) -> Self {
        self.shading = shading;
        self
    }

    pub fn transform(mut self, transform: ColorTransform) -> Self {
        self.transform = transform;
        self
    }
}

/// Pre-transformed, vertex-colored geometry with depth test and write.
///
/// Back faces are culled with counter-clockwise front faces.
pub struct MeshPass {
    config: MeshPassConfig,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
}

impl MeshPass {
    pub fn new(device: &wgpu::Device, config: MeshPassConfig) -> Self {
        let shader = PassShader::Mesh;
        let module = shader.create_module(device);

        let bind_group_layout = match config.shading {
            MeshShading::Textured => Some(binding::create_layout(
                device,
                "lumen mesh bgl",
                TextureSlot::Color,
                false,
            )),
            MeshShading::DebugColor => None,
        };

        let pipeline = create_pipeline(
            device,
            &PipelineDesc {
                label: "lumen mesh pipeline",
                module: &module,
                vs_entry: "vs_main",
                fs_entry: config.shading.fragment_entry(),
                buffers: &[MeshVertex::layout()],
                bind_group_layout: bind_group_layout.as_ref(),
                color_format: config.color_format,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                overrides: ShaderOverrides {
                    color_transform: Some(config.transform),
                    winding: None,
                }
                .for_shader(shader),
            },
        );

        log::info!(
            "mesh pass ready: {:?}, transform {:?}, target {:?}",
            config.shading,
            config.transform,
            config.color_format
        );

        Self {
            config,
            pipeline,
            bind_group_layout,
        }
    }

    #[inline]
    pub fn config(&self) -> &MeshPassConfig {
        &self.config
    }

    #[inline]
    pub fn bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.bind_group_layout.as_ref()
    }

    pub fn record(&self, rpass: &mut wgpu::RenderPass<'_>, inputs: &DrawInputs<'_>) -> Result<()> {
        let label = "lumen mesh pass";
        let (vertices, count) = require_vertices(label, inputs)?;

        rpass.set_pipeline(&self.pipeline);
        if self.bind_group_layout.is_some() {
            rpass.set_bind_group(0, require_bind_group(label, inputs)?, &[]);
        }
        rpass.set_vertex_buffer(0, vertices.slice(..));
        rpass.draw(0..count, 0..1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_textured_approx_linearize() {
        let c = MeshPassConfig::new(wgpu::TextureFormat::Rgba16Float);
        assert_eq!(c.shading, MeshShading::Textured);
        assert_eq!(c.transform, ColorTransform::ApproxLinearize);
    }

    #[test]
    fn builder_overrides_fields() {
        let c = MeshPassConfig::new(wgpu::TextureFormat::Bgra8UnormSrgb)
            .shading(MeshShading::DebugColor)
            .transform(ColorTransform::ApproxLinearize255);
        assert_eq!(c.shading, MeshShading::DebugColor);
        assert_eq!(c.transform, ColorTransform::ApproxLinearize255);
        assert_eq!(c.color_format, wgpu::TextureFormat::Bgra8UnormSrgb);
    }

    #[test]
    fn fragment_entries_exist_in_module() {
        let src = PassShader::Mesh.source();
        for shading in [MeshShading::Textured, MeshShading::DebugColor] {
            assert!(src.contains(&format!("fn {}(", shading.fragment_entry())));
        }
    }
}
