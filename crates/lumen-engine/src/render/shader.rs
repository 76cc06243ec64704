//! WGSL assembly.
//!
//! Pass bodies share three snippets (uniform block, color transforms,
//! fullscreen generator). Each pass module is the concatenation of the snippets
//! it needs followed by its body. Variant tags are pipeline-override constants,
//! resolved when the pipeline is built rather than per fragment.

use crate::shading::{ColorTransform, QuadWinding};

pub const UNIFORMS_WGSL: &str = include_str!("shaders/uniforms.wgsl");
pub const COLOR_SPACE_WGSL: &str = include_str!("shaders/color_space.wgsl");
pub const FULLSCREEN_WGSL: &str = include_str!("shaders/fullscreen.wgsl");

const MESH_WGSL: &str = include_str!("shaders/mesh.wgsl");
const DEPTH_VIEW_WGSL: &str = include_str!("shaders/depth_view.wgsl");
const PRESENT_WGSL: &str = include_str!("shaders/present.wgsl");

pub const COLOR_TRANSFORM_OVERRIDE: &str = "COLOR_TRANSFORM";
pub const QUAD_WINDING_OVERRIDE: &str = "QUAD_WINDING";

/// Shader program backing one pass kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PassShader {
    Mesh,
    DepthView,
    Present,
}

impl PassShader {
    pub const ALL: [PassShader; 3] = [PassShader::Mesh, PassShader::DepthView, PassShader::Present];

    pub fn label(self) -> &'static str {
        match self {
            PassShader::Mesh => "lumen mesh shader",
            PassShader::DepthView => "lumen depth view shader",
            PassShader::Present => "lumen present shader",
        }
    }

    fn parts(self) -> &'static [&'static str] {
        match self {
            PassShader::Mesh => &[COLOR_SPACE_WGSL, MESH_WGSL],
            PassShader::DepthView => &[UNIFORMS_WGSL, FULLSCREEN_WGSL, DEPTH_VIEW_WGSL],
            PassShader::Present => {
                &[UNIFORMS_WGSL, COLOR_SPACE_WGSL, FULLSCREEN_WGSL, PRESENT_WGSL]
            }
        }
    }

    /// Complete WGSL module text.
    pub fn source(self) -> String {
        compose(self.parts())
    }

    pub fn has_color_transform(self) -> bool {
        self.parts().contains(&COLOR_SPACE_WGSL)
    }

    pub fn has_fullscreen(self) -> bool {
        self.parts().contains(&FULLSCREEN_WGSL)
    }

    pub fn create_module(self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label()),
            source: wgpu::ShaderSource::Wgsl(self.source().into()),
        })
    }
}

/// Concatenates WGSL fragments in order, one blank line apart.
pub fn compose(parts: &[&str]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for part in parts {
        out.push_str(part.trim_end());
        out.push_str("\n\n");
    }
    out
}

/// Pipeline-override values for one pipeline.
///
/// Only overrides declared by the module may be passed to wgpu, so each value
/// is optional and omitted when the pass shader does not include its snippet.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShaderOverrides {
    pub color_transform: Option<ColorTransform>,
    pub winding: Option<QuadWinding>,
}

impl ShaderOverrides {
    pub fn constants(&self) -> Vec<(&'static str, f64)> {
        let mut out = Vec::with_capacity(2);
        if let Some(t) = self.color_transform {
            out.push((COLOR_TRANSFORM_OVERRIDE, t.shader_id() as f64));
        }
        if let Some(w) = self.winding {
            out.push((QUAD_WINDING_OVERRIDE, w.shader_id() as f64));
        }
        out
    }

    /// Drops overrides the given shader does not declare.
    pub fn for_shader(self, shader: PassShader) -> Self {
        Self {
            color_transform: self.color_transform.filter(|_| shader.has_color_transform()),
            winding: self.winding.filter(|_| shader.has_fullscreen()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_keeps_order() {
        let s = compose(&["a", "b\n\n", "c"]);
        assert_eq!(s, "a\n\nb\n\nc\n\n");
    }

    #[test]
    fn mesh_module_has_no_fullscreen_snippet() {
        assert!(PassShader::Mesh.has_color_transform());
        assert!(!PassShader::Mesh.has_fullscreen());
        assert!(!PassShader::Mesh.source().contains("QUAD_WINDING"));
    }

    #[test]
    fn depth_module_has_no_color_snippet() {
        assert!(!PassShader::DepthView.has_color_transform());
        assert!(PassShader::DepthView.has_fullscreen());
        assert!(PassShader::DepthView.source().contains("struct Uniforms"));
    }

    #[test]
    fn present_module_has_everything() {
        let src = PassShader::Present.source();
        assert!(src.contains("override COLOR_TRANSFORM"));
        assert!(src.contains("override QUAD_WINDING"));
        assert!(src.contains("struct Uniforms"));
        // Snippets precede the body that uses them.
        assert!(src.find("fn apply_color_transform").unwrap() < src.find("fn fs_main").unwrap());
    }

    #[test]
    fn overrides_filtered_per_shader() {
        let o = ShaderOverrides {
            color_transform: Some(ColorTransform::ApproxLinearize),
            winding: Some(QuadWinding::CounterClockwise),
        };
        assert_eq!(o.for_shader(PassShader::Mesh).constants(), vec![("COLOR_TRANSFORM", 3.0)]);
        assert_eq!(o.for_shader(PassShader::DepthView).constants(), vec![("QUAD_WINDING", 1.0)]);
        assert_eq!(o.for_shader(PassShader::Present).constants().len(), 2);
    }
}
