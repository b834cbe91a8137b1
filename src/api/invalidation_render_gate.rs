use crate::error::GanttResult;
use crate::render::{RenderFrame, Renderer};

use super::GanttEngine;

pub(super) fn build_render_frame_if_invalidated<R: Renderer>(
    engine: &GanttEngine<R>,
) -> GanttResult<Option<RenderFrame>> {
    if !engine.has_pending_invalidation() {
        return Ok(None);
    }
    engine.build_render_frame().map(Some)
}
