use crate::render::{GanttLayerKind, LayeredRenderFrame, RectPrimitive, TextHAlign, TextPrimitive};

use super::layout_helpers::{estimate_label_text_width_px, flow_left_to_right};
use super::redraw_context::RedrawContext;

const SWATCH_PX: f64 = 12.0;
const SWATCH_LABEL_GAP_PX: f64 = 4.0;
const ENTRY_GAP_PX: f64 = 16.0;

/// One swatch and label per legend value, in first-seen order, across the
/// top of the timeline.
pub(super) fn build_legend_layer(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let layout = ctx.input.layout;
    if layout.legend_height <= 0.0 {
        return;
    }
    let colors = ctx.input.colors;
    let font = ctx.theme().legend_font;
    let values: Vec<&str> = colors.legend_values().collect();
    let widths = values.iter().map(|value| {
        SWATCH_PX + SWATCH_LABEL_GAP_PX + estimate_label_text_width_px(value, font.size_px)
    });
    let positions = flow_left_to_right(widths, ctx.chart_left(), ENTRY_GAP_PX, ctx.chart_right());

    let swatch_y = (layout.legend_height - SWATCH_PX) / 2.0;
    let text_y = layout.legend_height / 2.0 + font.size_px / 3.0;
    for (value, x) in values.iter().zip(positions) {
        let Some(color) = colors.for_legend(value) else {
            continue;
        };
        frame.push_rect(
            GanttLayerKind::Legend,
            RectPrimitive::new(x, swatch_y, SWATCH_PX, SWATCH_PX, color),
        );
        if value.is_empty() {
            continue;
        }
        frame.push_text(
            GanttLayerKind::Legend,
            TextPrimitive::new(
                *value,
                x + SWATCH_PX + SWATCH_LABEL_GAP_PX,
                text_y,
                font.size_px,
                font.color,
                TextHAlign::Left,
            )
            .with_emphasis(font.bold, font.italic),
        );
    }
}
