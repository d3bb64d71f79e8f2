use std::time::Duration;

use anyhow::{Context, Result};
use gridmesh_engine::core::{App, AppControl, FrameCtx};
use gridmesh_engine::render::RenderCtx;
use gridmesh_engine::render::grid::{GridConfig, GridRenderer, GridTransform};
use gridmesh_engine::time::FrameRate;
use gridmesh_engine::wgpu;

use crate::bindings::{KeyBindings, Toggles};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.33,
    a: 1.0,
};

/// The grid demo: one renderer driven by the F-key toggles.
pub struct GridDemo {
    grid: GridConfig,
    renderer: Option<GridRenderer>,
    bindings: KeyBindings,
    toggles: Toggles,
    frame_rate: FrameRate,
}

impl GridDemo {
    pub fn new(grid: GridConfig, rotate: bool) -> Self {
        Self {
            toggles: Toggles {
                wireframe: grid.wireframe,
                rotate,
                ..Toggles::default()
            },
            grid,
            renderer: None,
            bindings: KeyBindings::default(),
            frame_rate: FrameRate::new(Duration::from_secs(1)),
        }
    }

    /// Applies this frame's key presses. Returns `false` on quit.
    fn handle_input(&mut self, ctx: &FrameCtx<'_, '_>) -> bool {
        let before = self.toggles;
        for action in self.bindings.actions(ctx.input_frame) {
            self.toggles.apply(action);
        }

        if self.toggles.quit {
            return false;
        }

        if self.toggles.rotate != before.rotate {
            log::info!("rotation {}", on_off(self.toggles.rotate));
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return true;
        };

        if self.toggles.wireframe != renderer.wireframe() {
            renderer.set_wireframe(self.toggles.wireframe);
            // Falls back to filled when the device cannot draw lines.
            self.toggles.wireframe = renderer.wireframe();
            log::info!("wireframe {}", on_off(self.toggles.wireframe));
        }

        if std::mem::take(&mut self.toggles.remap) {
            renderer.request_remap();
        }

        true
    }
}

impl App for GridDemo {
    fn on_start(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let renderer = GridRenderer::new(ctx, &self.grid).context("failed to set up grid renderer")?;
        self.toggles.wireframe = renderer.wireframe();
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.handle_input(ctx) {
            return AppControl::Exit;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        let transform = GridTransform::new(self.toggles.rotate);
        let mut drawn: Result<()> = Ok(());
        let control = ctx.render(CLEAR_COLOR, |rctx, target| {
            drawn = renderer.render_frame(rctx, target, &transform);
        });

        if let Err(err) = drawn {
            ctx.runtime.fail(err.context("frame render failed"));
            return AppControl::Exit;
        }

        if let Some(fps) = self.frame_rate.record(ctx.time.now) {
            log::trace!("{fps:.1} fps");
        }

        control
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
