use anyhow::{anyhow, Context, Result};
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};

use super::app::AppControl;

/// Surface-side handles for one frame.
pub struct SurfaceTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the surface, calls `draw` with the frame's encoder + view,
    /// then presents.
    ///
    /// Recoverable surface errors skip the frame. An unrecoverable surface
    /// error or a failing `draw` is returned; the frame is dropped unpresented.
    pub fn render<F>(&mut self, draw: F) -> Result<AppControl>
    where
        F: FnOnce(SurfaceTarget<'_>) -> Result<()>,
    {
        if !self.gpu.is_drawable() {
            return Ok(AppControl::Continue);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let reason = err.to_string();
                let action = self.gpu.handle_surface_error(err);
                return surface_outcome(action, &reason);
            }
        };

        draw(SurfaceTarget {
            encoder: &mut frame.encoder,
            view: &frame.view,
        })
        .context("frame recording failed")?;

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(AppControl::Continue)
    }
}

fn surface_outcome(action: SurfaceErrorAction, reason: &str) -> Result<AppControl> {
    match action {
        SurfaceErrorAction::Fatal => Err(anyhow!("unrecoverable surface error: {reason}")),
        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
            Ok(AppControl::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_surface_errors_keep_running() {
        for action in [SurfaceErrorAction::Reconfigured, SurfaceErrorAction::SkipFrame] {
            assert_eq!(surface_outcome(action, "lost").unwrap(), AppControl::Continue);
        }
    }

    #[test]
    fn fatal_surface_error_is_an_error() {
        let err = surface_outcome(SurfaceErrorAction::Fatal, "out of memory").unwrap_err();
        assert!(err.to_string().contains("out of memory"));
    }
}
