use crate::error::GanttResult;
use crate::render::{LayerStack, LayeredRenderFrame, RenderFrame, Renderer};

use super::axis_layer_builder::build_axis_layer;
use super::background_layer_builder::build_background_layers;
use super::bar_layer_builder::build_bar_layers;
use super::dependency_layer_builder::build_dependency_layer;
use super::legend_layer_builder::build_legend_layer;
use super::placeholder::build_placeholder_frame;
use super::redraw_context::{RedrawContext, RedrawInput};
use super::row_label_layer_builder::build_row_label_layer;
use super::{GanttEngine, ViewState};

/// Builds every layer of one frame from scratch.
///
/// Geometry depends only on `input` and `view`: the same pair always
/// yields the same frame, however often it is called.
pub fn build_layered_frame(
    input: RedrawInput<'_>,
    view: &ViewState,
) -> GanttResult<LayeredRenderFrame> {
    let ctx = RedrawContext::new(input, view)?;
    let mut frame = LayeredRenderFrame::from_stack(input.layout.viewport, LayerStack::canonical());

    build_background_layers(&ctx, &mut frame);
    build_bar_layers(&ctx, &mut frame);
    build_dependency_layer(&ctx, &mut frame);
    build_axis_layer(&ctx, &mut frame);
    build_row_label_layer(&ctx, &mut frame);
    build_legend_layer(&ctx, &mut frame);
    Ok(frame)
}

impl<R: Renderer> GanttEngine<R> {
    /// Inputs of the next frame, or `None` while there is nothing to draw.
    pub(super) fn redraw_input(&self) -> Option<RedrawInput<'_>> {
        let model = &self.core.model;
        let layout = model.layout.as_ref()?;
        let engine = model.transform.as_ref()?;
        if model.tasks.is_empty() {
            return None;
        }
        Some(RedrawInput {
            tasks: &model.tasks,
            rows: &model.rows,
            layout,
            theme: &self.core.config.theme,
            colors: &model.colors,
            original: engine.original_scale(),
            thresholds: self.core.config.granularity_thresholds,
            today_ms: model.today_ms,
        })
    }

    /// Layered frame for the current state; the placeholder when no data
    /// is bound.
    pub fn build_layered_render_frame(&self) -> GanttResult<LayeredRenderFrame> {
        match self.redraw_input() {
            Some(input) => build_layered_frame(input, &self.core.view),
            None => Ok(build_placeholder_frame(
                self.core.model.viewport,
                &self.core.config.theme,
            )),
        }
    }

    pub fn build_render_frame(&self) -> GanttResult<RenderFrame> {
        Ok(self.build_layered_render_frame()?.flatten())
    }

    /// True when the next frame is the placeholder.
    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        self.redraw_input().is_none()
    }
}
