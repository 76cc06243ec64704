use anyhow::Result;

use crate::render::binding::{self, TextureSlot};
use crate::render::shader::{PassShader, ShaderOverrides};
use crate::shading::{ColorTransform, QuadWinding, FULLSCREEN_VERTEX_COUNT};

use super::{create_pipeline, require_bind_group, DrawInputs, PipelineDesc};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PresentConfig {
    pub winding: QuadWinding,
    /// Runs only while the uniform's `srgb_surface` flag is 0.0.
    pub transform: ColorTransform,
    pub surface_format: wgpu::TextureFormat,
}

impl PresentConfig {
    pub fn new(surface_format: wgpu::TextureFormat) -> Self {
        Self {
            winding: QuadWinding::default(),
            transform: ColorTransform::Linearize,
            surface_format,
        }
    }

    pub fn winding(mut self, winding: QuadWinding) -> Self {
        self.winding = winding;
        self
    }

    /// Textured-quad policy: delinearize instead of linearize on linear surfaces.
    pub fn textured_quad(mut self) -> Self {
        self.transform = ColorTransform::Delinearize;
        self
    }

    /// Override constants for the present module.
    pub fn overrides(&self) -> ShaderOverrides {
        ShaderOverrides {
            color_transform: Some(self.transform),
            winding: Some(self.winding),
        }
        .for_shader(PassShader::Present)
    }
}

/// Copies an offscreen color texture onto the surface with a fullscreen quad.
///
/// Sampled alpha is preserved.
pub struct PresentPass {
    config: PresentConfig,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl PresentPass {
    /// Present variant: linearizes on linear surfaces.
    pub fn new(device: &wgpu::Device, config: PresentConfig) -> Self {
        Self::build(device, config)
    }

    /// Textured-quad variant: delinearizes on linear surfaces.
    pub fn textured_quad(device: &wgpu::Device, config: PresentConfig) -> Self {
        Self::build(device, config.textured_quad())
    }

    fn build(device: &wgpu::Device, config: PresentConfig) -> Self {
        let shader = PassShader::Present;
        let module = shader.create_module(device);

        let bind_group_layout =
            binding::create_layout(device, "lumen present bgl", TextureSlot::Color, true);

        let pipeline = create_pipeline(
            device,
            &PipelineDesc {
                label: "lumen present pipeline",
                module: &module,
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                buffers: &[],
                bind_group_layout: Some(&bind_group_layout),
                color_format: config.surface_format,
                front_face: config.winding.front_face(),
                cull_mode: Some(wgpu::Face::Back),
                depth_write: false,
                overrides: config.overrides(),
            },
        );

        log::info!(
            "present pass ready: {:?} winding, {:?} on linear surfaces, target {:?}",
            config.winding,
            config.transform,
            config.surface_format
        );

        Self {
            config,
            pipeline,
            bind_group_layout,
        }
    }

    #[inline]
    pub fn config(&self) -> &PresentConfig {
        &self.config
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn record(&self, rpass: &mut wgpu::RenderPass<'_>, inputs: &DrawInputs<'_>) -> Result<()> {
        let bind_group = require_bind_group("lumen present pass", inputs)?;

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..FULLSCREEN_VERTEX_COUNT, 0..1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_defaults_to_linearize() {
        let c = PresentConfig::new(wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(c.transform, ColorTransform::Linearize);
        assert_eq!(c.winding, QuadWinding::Clockwise);
    }

    #[test]
    fn winding_builder() {
        let c = PresentConfig::new(wgpu::TextureFormat::Bgra8Unorm)
            .winding(QuadWinding::CounterClockwise);
        assert_eq!(c.winding.front_face(), wgpu::FrontFace::Ccw);
    }

    #[test]
    fn present_overrides_select_linearize() {
        let c = PresentConfig::new(wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(
            c.overrides().constants(),
            vec![("COLOR_TRANSFORM", 1.0), ("QUAD_WINDING", 0.0)]
        );
    }

    #[test]
    fn textured_quad_overrides_select_delinearize() {
        let c = PresentConfig::new(wgpu::TextureFormat::Bgra8Unorm)
            .winding(QuadWinding::CounterClockwise)
            .textured_quad();
        assert_eq!(c.transform, ColorTransform::Delinearize);
        assert_eq!(
            c.overrides().constants(),
            vec![("COLOR_TRANSFORM", 2.0), ("QUAD_WINDING", 1.0)]
        );
    }
}
