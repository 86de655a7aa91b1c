use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, WindowCtx};
use crate::render::RenderCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by samples and tools.
pub trait App {
    /// Called once after the window and GPU are ready.
    ///
    /// GPU resources (pipelines, meshes) are created here. An error stops the
    /// runtime and is returned from `Runtime::run`.
    fn on_start(&mut self, window: &WindowCtx<'_>, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = (window, ctx);
        Ok(())
    }

    /// Called after the surface was reconfigured to a new, non-zero size.
    fn on_resize(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
