//! Shading core evaluated on the CPU.
//!
//! These are the reference semantics for the WGSL passes in `render`:
//! - color space transforms and the `srgb_surface` flag
//! - the fullscreen quad generator
//! - texture coordinate derivation for the depth and present passes
//! - per-pass fragment stages
//!
//! Everything here is pure and GPU-free.

pub mod color_space;
pub mod fragment;
pub mod fullscreen;
pub mod sampler;
pub mod texcoord;

pub use color_space::{ColorTransform, SurfaceEncoding};
pub use fragment::{FragmentInput, MeshVaryings, DEBUG_COLOR};
pub use fullscreen::{QuadWinding, FULLSCREEN_VERTEX_COUNT};
pub use sampler::{CpuTexture, SolidTexture, Texel2d};
pub use texcoord::DepthAddressing;
