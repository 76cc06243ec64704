use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, binds a GPU context to it and drives `app` until exit.
    ///
    /// Errors raised while the loop runs (window or GPU creation, app setup,
    /// a failed frame) are returned after the loop stops.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.into_result()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            failure: None,
            exit_requested: false,
        }
    }

    /// Keeps the first failure and requests exit.
    fn record_failure(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.exit_requested = true;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.record_failure(err);
        event_loop.exit();
    }

    /// Folds a frame result into the loop state; true when the loop should stop.
    fn settle_frame(&mut self, outcome: Result<AppControl>) -> bool {
        match outcome {
            Ok(AppControl::Continue) => false,
            Ok(AppControl::Exit) => {
                self.exit_requested = true;
                true
            }
            Err(e) => {
                self.record_failure(e);
                true
            }
        }
    }

    fn into_result(self) -> Result<()> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntry::try_new(window, |w| {
            pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
        })?;

        entry
            .with_gpu(|gpu| self.app.on_gpu_ready(gpu))
            .context("application setup failed")?;

        Ok(entry)
    }

    fn is_current(&self, window_id: WindowId) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|e| e.with_window(|w| w.id()) == window_id)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested || !self.is_current(window_id) {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let mut outcome: Result<AppControl> = Ok(AppControl::Continue);

        match &event {
            WindowEvent::CloseRequested => outcome = Ok(AppControl::Exit),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_mut(|fields| {
                    let size = fields.window.inner_size();
                    fields.gpu.resize(size);
                    if fields.gpu.is_drawable() {
                        log::debug!("resized to {}x{}", size.width, size.height);
                        app.on_resized(fields.gpu, size);
                    }
                    fields.window.request_redraw();
                });
            }

            WindowEvent::RedrawRequested => {
                entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                    };
                    outcome = app.on_frame(&mut ctx);
                });
            }

            _ => {}
        }

        if self.settle_frame(outcome) {
            self.entry = None;
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;

    impl CoreApp for Idle {
        fn on_gpu_ready(&mut self, _gpu: &Gpu<'_>) -> Result<()> {
            Ok(())
        }

        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
            Ok(AppControl::Continue)
        }
    }

    fn state() -> AppState<Idle> {
        AppState::new(RuntimeConfig::default(), GpuInit::default(), Idle)
    }

    #[test]
    fn continue_keeps_running() {
        let mut s = state();
        assert!(!s.settle_frame(Ok(AppControl::Continue)));
        assert!(!s.exit_requested);
        assert!(s.into_result().is_ok());
    }

    #[test]
    fn exit_is_a_clean_stop() {
        let mut s = state();
        assert!(s.settle_frame(Ok(AppControl::Exit)));
        assert!(s.exit_requested);
        assert!(s.into_result().is_ok());
    }

    #[test]
    fn frame_error_surfaces_from_run() {
        let mut s = state();
        assert!(s.settle_frame(Err(anyhow::anyhow!("lumen present pass: no bind group"))));
        assert!(s.exit_requested);
        let err = s.into_result().unwrap_err();
        assert!(err.to_string().contains("no bind group"));
    }

    #[test]
    fn first_failure_wins() {
        let mut s = state();
        s.settle_frame(Err(anyhow::anyhow!("first")));
        s.settle_frame(Err(anyhow::anyhow!("second")));
        assert_eq!(s.into_result().unwrap_err().to_string(), "first");
    }
}
