//! Command line options, layered over `StudioConfig::default()`.

use clap::{Parser, ValueEnum};
use lumen_engine::render::{DepthVertexSource, MeshShading};
use lumen_engine::shading::{ColorTransform, DepthAddressing, QuadWinding};

use crate::config::StudioConfig;

#[derive(Parser, Debug)]
#[command(name = "lumen-studio", version, about = "Mesh, depth preview and present passes")]
pub struct StudioArgs {
    /// Fill the mesh with the debug color instead of sampling its texture.
    #[arg(long)]
    pub debug_color: bool,

    /// Divide mesh color by 255 before the curve (compatibility variant).
    #[arg(long = "approx-255")]
    pub approx_255: bool,

    /// Start in the depth preview (toggle with D).
    #[arg(long)]
    pub depth: bool,

    /// Feed the depth preview from a vertex buffer instead of the generated quad.
    #[arg(long)]
    pub depth_buffer: bool,

    /// Address depth by clip xy / w instead of pixel / resolution.
    #[arg(long)]
    pub depth_perspective: bool,

    /// Wind fullscreen quads counter-clockwise.
    #[arg(long)]
    pub ccw: bool,

    /// Present with the textured-quad policy (delinearize on linear surfaces).
    #[arg(long)]
    pub textured_quad: bool,

    /// Prefer a non-sRGB surface format.
    #[arg(long)]
    pub linear_surface: bool,

    /// Surface present mode; the best supported one when omitted.
    #[arg(long, value_enum)]
    pub present_mode: Option<CliPresentMode>,

    /// Initial window width in logical pixels.
    #[arg(long)]
    pub width: Option<f64>,

    /// Initial window height in logical pixels.
    #[arg(long)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliPresentMode {
    Fifo,
    Mailbox,
    Immediate,
    AutoVsync,
    AutoNoVsync,
}

impl From<CliPresentMode> for wgpu::PresentMode {
    fn from(cli: CliPresentMode) -> Self {
        match cli {
            CliPresentMode::Fifo => wgpu::PresentMode::Fifo,
            CliPresentMode::Mailbox => wgpu::PresentMode::Mailbox,
            CliPresentMode::Immediate => wgpu::PresentMode::Immediate,
            CliPresentMode::AutoVsync => wgpu::PresentMode::AutoVsync,
            CliPresentMode::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

impl StudioArgs {
    pub fn apply(&self, mut config: StudioConfig) -> StudioConfig {
        if self.debug_color {
            config.mesh_shading = MeshShading::DebugColor;
        }
        if self.approx_255 {
            config.mesh_transform = ColorTransform::ApproxLinearize255;
        }
        if self.depth {
            config.start_in_depth_view = true;
        }
        if self.depth_perspective {
            config.depth_addressing = DepthAddressing::PerspectiveDivide;
        }

        let winding = if self.ccw {
            QuadWinding::CounterClockwise
        } else {
            QuadWinding::Clockwise
        };
        config.winding = winding;
        config.depth_source = if self.depth_buffer {
            DepthVertexSource::Buffer
        } else {
            DepthVertexSource::Fullscreen(winding)
        };

        config.textured_quad_present = self.textured_quad;
        if self.linear_surface {
            config.gpu.prefer_srgb = false;
        }
        if let Some(mode) = self.present_mode {
            config.gpu.present_mode = Some(mode.into());
        }
        if let Some(w) = self.width {
            config.size.0 = w;
        }
        if let Some(h) = self.height {
            config.size.1 = h;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> StudioConfig {
        let argv = std::iter::once("lumen-studio").chain(args.iter().copied());
        StudioArgs::try_parse_from(argv)
            .unwrap()
            .apply(StudioConfig::default())
    }

    #[test]
    fn command_is_well_formed() {
        StudioArgs::command().debug_assert();
    }

    #[test]
    fn no_flags_keep_defaults() {
        let c = parse(&[]);
        let d = StudioConfig::default();
        assert_eq!(c.mesh_shading, d.mesh_shading);
        assert_eq!(c.mesh_transform, d.mesh_transform);
        assert_eq!(c.depth_source, d.depth_source);
        assert_eq!(c.depth_addressing, d.depth_addressing);
        assert_eq!(c.winding, d.winding);
        assert_eq!(c.size, d.size);
        assert_eq!(c.gpu.present_mode, None);
    }

    #[test]
    fn flags_override_defaults() {
        let c = parse(&[
            "--debug-color",
            "--approx-255",
            "--depth",
            "--depth-perspective",
            "--linear-surface",
            "--textured-quad",
        ]);
        assert_eq!(c.mesh_shading, MeshShading::DebugColor);
        assert_eq!(c.mesh_transform, ColorTransform::ApproxLinearize255);
        assert!(c.start_in_depth_view);
        assert_eq!(c.depth_addressing, DepthAddressing::PerspectiveDivide);
        assert!(!c.gpu.prefer_srgb);
        assert!(c.textured_quad_present);
    }

    #[test]
    fn ccw_flips_fullscreen_sources() {
        let c = parse(&["--ccw"]);
        assert_eq!(c.winding, QuadWinding::CounterClockwise);
        assert_eq!(c.depth_source, DepthVertexSource::Fullscreen(QuadWinding::CounterClockwise));
        assert_eq!(c.depth_winding(), QuadWinding::CounterClockwise);
    }

    #[test]
    fn buffer_source_uses_present_winding() {
        let c = parse(&["--depth-buffer", "--ccw"]);
        assert_eq!(c.depth_source, DepthVertexSource::Buffer);
        assert_eq!(c.depth_winding(), QuadWinding::CounterClockwise);
    }

    #[test]
    fn present_mode_and_size() {
        let c = parse(&["--present-mode", "mailbox", "--width", "800", "--height", "600"]);
        assert_eq!(c.gpu.present_mode, Some(wgpu::PresentMode::Mailbox));
        assert_eq!(c.size, (800.0, 600.0));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(StudioArgs::try_parse_from(["lumen-studio", "--nope"]).is_err());
        assert!(StudioArgs::try_parse_from(["lumen-studio", "--present-mode", "vsync"]).is_err());
    }
}
