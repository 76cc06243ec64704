use std::time::Duration;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use lumen_engine::core::{App, AppControl, FrameCtx, SurfaceTarget};
use lumen_engine::device::Gpu;
use lumen_engine::render::binding::BindingSet;
use lumen_engine::render::texture::checkerboard_rgba8;
use lumen_engine::render::{
    DepthVertex, DepthVisualizationConfig, DepthVisualizationPass, DrawInputs, GpuTexture,
    MeshPass, MeshPassConfig, PresentConfig, PresentPass, RenderPass, RenderTarget,
    ResolutionBlock, TRIANGLE_VERTICES,
};
use lumen_engine::shading::FULLSCREEN_VERTEX_COUNT;
use lumen_engine::time::{Debouncer, FrameClock, FrameStats, FrameSummary};

use crate::config::StudioConfig;
use crate::view::{Command, ViewMode};

const CHECKER_SIZE: u32 = 64;
const CHECKER_CELLS: u32 = 8;

/// Size-dependent resources, rebuilt on resize.
struct Targets {
    frame: GpuTexture,
    depth: GpuTexture,
    depth_view_bg: Option<wgpu::BindGroup>,
    present_bg: Option<wgpu::BindGroup>,
}

/// GPU state created once the device exists.
struct Resources {
    mesh: RenderPass,
    depth_view: RenderPass,
    present: RenderPass,

    uniforms: ResolutionBlock,
    _diffuse: GpuTexture,
    mesh_bg: Option<wgpu::BindGroup>,

    triangle: wgpu::Buffer,
    depth_quad: wgpu::Buffer,

    targets: Targets,
}

pub struct Studio {
    config: StudioConfig,
    view: ViewMode,
    resources: Option<Resources>,

    clock: FrameClock,
    stats: FrameStats,
    since_title: Duration,
    resize: Debouncer<PhysicalSize<u32>>,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Self {
        let view = ViewMode::initial(config.start_in_depth_view);
        let resize = Debouncer::new(config.resize_delay);
        Self {
            config,
            view,
            resources: None,
            clock: FrameClock::new(),
            stats: FrameStats::new(),
            since_title: Duration::ZERO,
            resize,
        }
    }

    /// Targets follow once resizing has been quiet for `resize_delay`.
    fn queue_resize(&mut self, size: PhysicalSize<u32>) {
        log::trace!("resize queued: {}x{}", size.width, size.height);
        self.resize.push(size);
    }

    fn refresh_title(&mut self, window: &Window, dt: Duration) {
        self.since_title += dt;
        if self.since_title < self.config.title_refresh {
            return;
        }
        self.since_title = Duration::ZERO;

        if let Some(summary) = self.stats.summary() {
            window.set_title(&frame_title(&self.config.title, &summary));
        }
    }

    fn create_resources(&self, gpu: &Gpu<'_>) -> Result<Resources> {
        let device = gpu.device();
        let queue = gpu.queue();
        let cfg = &self.config;

        let mesh: RenderPass = MeshPass::new(
            device,
            MeshPassConfig::new(cfg.frame_format)
                .shading(cfg.mesh_shading)
                .transform(cfg.mesh_transform),
        )
        .into();

        let depth_view: RenderPass = DepthVisualizationPass::new(
            device,
            DepthVisualizationConfig::new(cfg.frame_format)
                .source(cfg.depth_source)
                .addressing(cfg.depth_addressing),
        )
        .into();

        let present_config = PresentConfig::new(gpu.surface_format()).winding(cfg.winding);
        let present: RenderPass = if cfg.textured_quad_present {
            PresentPass::textured_quad(device, present_config)
        } else {
            PresentPass::new(device, present_config)
        }
        .into();

        let uniforms = ResolutionBlock::new(device, gpu.resolution(), gpu.surface_encoding());

        let pixels = checkerboard_rgba8(
            CHECKER_SIZE,
            CHECKER_CELLS,
            [235, 235, 235, 255],
            [120, 160, 220, 255],
        );
        let diffuse = GpuTexture::from_rgba8(
            device,
            queue,
            CHECKER_SIZE,
            CHECKER_SIZE,
            &pixels,
            "lumen checkerboard",
        )?;
        let mesh_bg =
            mesh.create_bind_group(device, BindingSet::new(&diffuse.view, &diffuse.sampler))?;

        let triangle = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let depth_quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lumen depth quad vbo"),
            contents: bytemuck::cast_slice(&DepthVertex::fullscreen(cfg.depth_winding())),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let targets = create_targets(gpu, cfg, gpu.size(), &depth_view, &present, &uniforms)?;

        Ok(Resources {
            mesh,
            depth_view,
            present,
            uniforms,
            _diffuse: diffuse,
            mesh_bg,
            triangle,
            depth_quad,
            targets,
        })
    }
}

fn frame_title(base: &str, summary: &FrameSummary) -> String {
    format!("{base} | {summary}")
}

fn create_targets(
    gpu: &Gpu<'_>,
    cfg: &StudioConfig,
    size: PhysicalSize<u32>,
    depth_view: &RenderPass,
    present: &RenderPass,
    uniforms: &ResolutionBlock,
) -> Result<Targets> {
    let device = gpu.device();
    let (w, h) = target_extent(size);

    let frame = GpuTexture::frame_buffer(device, w, h, cfg.frame_format, "lumen frame buffer");
    let depth = GpuTexture::depth(device, w, h, "lumen depth");

    let depth_view_bg = depth_view.create_bind_group(
        device,
        BindingSet::new(&depth.view, &depth.sampler).with_uniform(uniforms.buffer()),
    )?;
    let present_bg = present.create_bind_group(
        device,
        BindingSet::new(&frame.view, &frame.sampler).with_uniform(uniforms.buffer()),
    )?;

    log::debug!("frame targets rebuilt at {w}x{h}");

    Ok(Targets {
        frame,
        depth,
        depth_view_bg,
        present_bg,
    })
}

/// Frame target dimensions for a drawable size; never zero.
fn target_extent(size: PhysicalSize<u32>) -> (u32, u32) {
    (size.width.max(1), size.height.max(1))
}

impl Resources {
    /// Rebuilds size-dependent state for a settled window size.
    fn apply_resize(
        &mut self,
        gpu: &Gpu<'_>,
        cfg: &StudioConfig,
        size: PhysicalSize<u32>,
    ) -> Result<()> {
        if self.targets.frame.size() == target_extent(size) {
            log::debug!("resize settled at the current target size");
            return Ok(());
        }

        self.uniforms
            .write_resolution(gpu.queue(), [size.width as f32, size.height as f32]);
        self.uniforms.write_encoding(gpu.queue(), gpu.surface_encoding());

        self.targets =
            create_targets(gpu, cfg, size, &self.depth_view, &self.present, &self.uniforms)
                .context("failed to rebuild frame targets")?;
        Ok(())
    }

    fn draw(&self, view: ViewMode, surface: SurfaceTarget<'_>) -> Result<()> {
        let SurfaceTarget { encoder, view: surface_view } = surface;
        let t = &self.targets;

        // Mesh into the offscreen frame buffer; also fills depth.
        {
            let mut target =
                RenderTarget::new(&mut *encoder, &t.frame.view).with_depth(&t.depth.view);
            let mut rpass = target.begin_pass(self.mesh.label());
            let mut inputs =
                DrawInputs::new().vertices(&self.triangle, TRIANGLE_VERTICES.len() as u32);
            inputs.bind_group = self.mesh_bg.as_ref();
            self.mesh.record(&mut rpass, &inputs)?;
        }

        if view == ViewMode::Depth {
            let mut target = RenderTarget::new(&mut *encoder, &t.frame.view);
            let mut rpass = target.begin_pass(self.depth_view.label());
            let mut inputs = DrawInputs::new().vertices(&self.depth_quad, FULLSCREEN_VERTEX_COUNT);
            inputs.bind_group = t.depth_view_bg.as_ref();
            self.depth_view.record(&mut rpass, &inputs)?;
        }

        {
            let mut target = RenderTarget::new(&mut *encoder, surface_view);
            let mut rpass = target.begin_pass(self.present.label());
            let mut inputs = DrawInputs::new();
            inputs.bind_group = t.present_bg.as_ref();
            self.present.record(&mut rpass, &inputs)?;
        }

        Ok(())
    }
}

impl App for Studio {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let resources = self.create_resources(gpu).context("studio setup failed")?;
        self.resources = Some(resources);
        self.clock.reset();
        log::info!("studio ready; D toggles the depth view, Escape quits");
        Ok(())
    }

    fn on_resized(&mut self, _gpu: &Gpu<'_>, size: PhysicalSize<u32>) {
        self.queue_resize(size);
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };

        match Command::from_key(event) {
            Some(Command::ToggleDepthView) => {
                self.view = self.view.toggled();
                log::info!("view: {:?}", self.view);
                AppControl::Continue
            }
            Some(Command::Quit) => AppControl::Exit,
            None => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let frame = self.clock.tick();
        self.stats.push(frame.dt);
        self.resize.tick(frame.dt);
        self.refresh_title(ctx.window, frame.dt);

        let Some(res) = self.resources.as_mut() else {
            return Ok(AppControl::Continue);
        };
        if let Some(size) = self.resize.take() {
            res.apply_resize(ctx.gpu, &self.config, size)?;
        }

        let res = &*res;
        let view = self.view;
        ctx.render(|surface| res.draw(view, surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_carries_frame_stats() {
        let summary = FrameSummary {
            average: Duration::from_millis(8),
            p95: Duration::from_millis(12),
            p99: Duration::from_millis(20),
        };
        assert_eq!(
            frame_title("Lumen Studio", &summary),
            "Lumen Studio | frame 8.00 ms (p95 12.00 ms, p99 20.00 ms)"
        );
    }

    #[test]
    fn target_extent_never_zero() {
        assert_eq!(target_extent(PhysicalSize::new(0, 0)), (1, 1));
        assert_eq!(target_extent(PhysicalSize::new(1280, 720)), (1280, 720));
    }

    #[test]
    fn resize_waits_for_quiet_period() {
        let mut studio = Studio::new(StudioConfig::default());
        studio.queue_resize(PhysicalSize::new(800, 600));
        studio.resize.tick(Duration::from_millis(50));
        studio.queue_resize(PhysicalSize::new(1024, 768));
        studio.resize.tick(Duration::from_millis(60));
        assert_eq!(studio.resize.take(), None);
        studio.resize.tick(Duration::from_millis(40));
        assert_eq!(studio.resize.take(), Some(PhysicalSize::new(1024, 768)));
    }
}
