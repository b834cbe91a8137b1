use tracing::trace;

use crate::error::GanttResult;
use crate::render::Renderer;

use super::GanttEngine;
use super::invalidation_render_gate::build_render_frame_if_invalidated;
use super::render_cycle_finalizer::finalize_render_cycle;

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut GanttEngine<R>) -> GanttResult<()> {
        let frame = engine.build_render_frame()?;
        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            paths = frame.paths.len(),
            texts = frame.texts.len(),
            "render frame"
        );
        engine.renderer.render(&frame)?;
        finalize_render_cycle(engine);
        Ok(())
    }

    /// Coalesces every invalidation since the last frame into one render.
    pub(super) fn render_if_needed<R: Renderer>(engine: &mut GanttEngine<R>) -> GanttResult<bool> {
        let Some(frame) = build_render_frame_if_invalidated(engine)? else {
            return Ok(false);
        };
        engine.renderer.render(&frame)?;
        finalize_render_cycle(engine);
        Ok(true)
    }
}
