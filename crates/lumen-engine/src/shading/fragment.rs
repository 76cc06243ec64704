//! Per-pass vertex and fragment stages evaluated on the CPU.
//!
//! Each function matches the corresponding entry point in `render/shaders`
//! line for line; GPU-free tests exercise pass behavior through these.

use super::color_space::ColorTransform;
use super::fullscreen::QuadWinding;
use super::sampler::Texel2d;
use super::texcoord::{perspective_texcoord, resolution_texcoord, DepthAddressing};

/// Constant fill used by the untextured mesh variant.
pub const DEBUG_COLOR: [f32; 3] = [0.5, 0.0, 0.5];

/// Rasterizer-provided inputs of a single fragment.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FragmentInput {
    /// `@builtin(position).xy`: framebuffer position in pixels.
    pub frag_coord: [f32; 2],
    /// Interpolated clip-space position forwarded by the vertex stage.
    pub clip_position: [f32; 4],
}

/// Interpolated mesh attributes reaching the fragment stage.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct MeshVaryings {
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// Mesh vertex stage: positions are already in clip space.
#[inline]
pub fn mesh_vertex(position: [f32; 3]) -> [f32; 4] {
    [position[0], position[1], position[2], 1.0]
}

/// Fullscreen vertex stage driven only by `vertex_index`.
#[inline]
pub fn fullscreen_vertex(winding: QuadWinding, vertex_index: u32) -> [f32; 4] {
    let [x, y] = winding.corner(vertex_index);
    [x, y, 0.0, 1.0]
}

/// Mesh fragment stage.
///
/// With a texture: `texel.rgb * color`, then `transform`. Without one the
/// interpolated color is ignored and [`DEBUG_COLOR`] is transformed instead.
/// Alpha is always 1.0.
pub fn mesh_fragment<T>(
    transform: ColorTransform,
    varyings: MeshVaryings,
    texture: Option<&T>,
) -> [f32; 4]
where
    T: Texel2d + ?Sized,
{
    let rgb = match texture {
        Some(t) => {
            let texel = t.sample(varyings.tex_coords);
            [
                texel[0] * varyings.color[0],
                texel[1] * varyings.color[1],
                texel[2] * varyings.color[2],
            ]
        }
        None => DEBUG_COLOR,
    };
    let [r, g, b] = transform.apply_rgb(rgb);
    [r, g, b, 1.0]
}

/// Depth visualization fragment stage: depth replicated into RGB, alpha 1.0.
///
/// `resolution` is read only in [`DepthAddressing::Resolution`] mode.
pub fn depth_fragment<T>(
    addressing: DepthAddressing,
    input: FragmentInput,
    resolution: [f32; 2],
    depth: &T,
) -> [f32; 4]
where
    T: Texel2d + ?Sized,
{
    let uv = match addressing {
        DepthAddressing::PerspectiveDivide => perspective_texcoord(input.clip_position),
        DepthAddressing::Resolution => resolution_texcoord(input.frag_coord, resolution),
    };
    let d = depth.sample(uv)[0];
    [d, d, d, 1.0]
}

/// Present fragment stage.
///
/// `transform` runs only when `srgb_surface == 0.0`; sampled alpha is kept.
pub fn present_fragment<T>(
    transform: ColorTransform,
    srgb_surface: f32,
    resolution: [f32; 2],
    frag_coord: [f32; 2],
    source: &T,
) -> [f32; 4]
where
    T: Texel2d + ?Sized,
{
    let uv = resolution_texcoord(frag_coord, resolution);
    let sample = source.sample(uv);
    transform.when_linear(srgb_surface).apply_rgba(sample)
}
