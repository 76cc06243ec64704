//! GPU rendering subsystem.
//!
//! Passes are single-draw-call units built on wgpu. The WGSL they run mirrors
//! `crate::shading` exactly; the CPU side is the tested reference.
//!
//! Convention:
//! - vertex positions arrive in clip space, no camera transform
//! - offscreen color is `texture::FRAME_FORMAT`, depth is `texture::DEPTH_FORMAT`

pub mod binding;
mod ctx;
pub mod passes;
pub mod shader;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use ctx::RenderTarget;
pub use passes::{
    DepthVertexSource, DepthVisualizationConfig, DepthVisualizationPass, DrawInputs, MeshPass,
    MeshPassConfig, MeshShading, PassKind, PresentConfig, PresentPass, RenderPass,
};
pub use texture::GpuTexture;
pub use uniforms::{ResolutionBlock, ResolutionUniform};
pub use vertex::{DepthVertex, MeshVertex, TRIANGLE_VERTICES};
