use std::time::Duration;

use lumen_engine::device::GpuInit;
use lumen_engine::logging::LoggingConfig;
use lumen_engine::render::texture::FRAME_FORMAT;
use lumen_engine::render::{DepthVertexSource, MeshShading};
use lumen_engine::shading::{ColorTransform, DepthAddressing, QuadWinding};
use lumen_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Everything the studio decides before the window opens.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub size: (f64, f64),

    /// Offscreen color target rendered by the mesh and depth passes.
    pub frame_format: wgpu::TextureFormat,

    pub mesh_shading: MeshShading,
    pub mesh_transform: ColorTransform,

    pub depth_source: DepthVertexSource,
    pub depth_addressing: DepthAddressing,

    /// Winding of the present pass quad.
    pub winding: QuadWinding,

    /// Present with the textured-quad policy (delinearize on linear surfaces).
    pub textured_quad_present: bool,

    pub start_in_depth_view: bool,

    /// Quiet period after the last resize before frame targets are rebuilt.
    pub resize_delay: Duration,

    /// How often the window title shows fresh frame-time stats.
    pub title_refresh: Duration,

    pub gpu: GpuInit,
    pub logging: LoggingConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "Lumen Studio".to_string(),
            size: (960.0, 640.0),
            frame_format: FRAME_FORMAT,
            mesh_shading: MeshShading::Textured,
            mesh_transform: ColorTransform::ApproxLinearize,
            depth_source: DepthVertexSource::Fullscreen(QuadWinding::Clockwise),
            depth_addressing: DepthAddressing::Resolution,
            winding: QuadWinding::Clockwise,
            textured_quad_present: false,
            start_in_depth_view: false,
            resize_delay: Duration::from_millis(100),
            title_refresh: Duration::from_millis(500),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StudioConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.size.0, self.size.1),
        }
    }

    /// Winding used for the depth-only vertex buffer and its culling.
    pub fn depth_winding(&self) -> QuadWinding {
        match self.depth_source {
            DepthVertexSource::Fullscreen(w) => w,
            DepthVertexSource::Buffer => self.winding,
        }
    }
}
