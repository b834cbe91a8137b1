use crate::core::{Granularity, calendar};
use crate::render::{
    GanttLayerKind, LayeredRenderFrame, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::axis_label_format::{band_segments, bottom_tick_plan, tick_instants, top_band_plan};
use super::redraw_context::RedrawContext;

const TOP_LABEL_OFFSET_PX: f64 = 12.0;
const WEEKEND_LABEL_TOP_PX: f64 = 28.0;
const WEEKEND_LABEL_HEIGHT_PX: f64 = 30.0;
const BOTTOM_TICK_TOP_PX: f64 = 38.0;
const BOTTOM_LABEL_OFFSET_PX: f64 = 44.0;
const DOMAIN_LINE_OFFSET_PX: f64 = 58.0;

/// Label centered on one axis interval, in chart pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
}

/// Bottom-band ticks and labels for the visible domain.
///
/// Every label sits halfway between its tick and the next one.
pub(super) fn bottom_band(ctx: &RedrawContext<'_>) -> (Vec<f64>, Vec<AxisLabel>) {
    let visible = ctx.visible;
    let plan = bottom_tick_plan(ctx.granularity, visible.span_ms());
    let ticks = tick_instants(plan, visible.start, visible.end);
    let labels = ticks
        .windows(2)
        .map(|pair| AxisLabel {
            text: calendar::format(pair[0], plan.pattern),
            x: (ctx.x(pair[0]) + ctx.x(pair[1])) / 2.0,
        })
        .collect();
    (ticks, labels)
}

pub(super) fn top_band(ctx: &RedrawContext<'_>) -> Vec<AxisLabel> {
    let Some(plan) = top_band_plan(ctx.granularity) else {
        return Vec::new();
    };
    band_segments(plan, ctx.visible.start, ctx.visible.end)
        .into_iter()
        .map(|(start, end)| AxisLabel {
            text: calendar::format(start, plan.pattern),
            x: (ctx.x(start) + ctx.x(end)) / 2.0,
        })
        .filter(|label| !label.text.is_empty())
        .collect()
}

pub(super) fn build_axis_layer(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let theme = ctx.theme();
    let layout = ctx.input.layout;
    let axis_top = layout.axis_top;
    frame.push_rect(
        GanttLayerKind::Axis,
        RectPrimitive::new(
            0.0,
            0.0,
            f64::from(layout.viewport.width),
            layout.header_height,
            theme.header_background,
        ),
    );

    let top_font = theme.axis_top_font;
    for label in top_band(ctx) {
        frame.push_text(
            GanttLayerKind::Axis,
            TextPrimitive::new(
                label.text,
                label.x,
                axis_top + TOP_LABEL_OFFSET_PX,
                top_font.size_px,
                top_font.color,
                TextHAlign::Center,
            )
            .with_emphasis(top_font.bold, top_font.italic),
        );
    }

    let (ticks, labels) = bottom_band(ctx);
    if ctx.granularity == Granularity::Day {
        for pair in ticks.windows(2) {
            if !calendar::is_weekend(pair[0]) {
                continue;
            }
            let x0 = ctx.x(pair[0]).floor();
            let x1 = ctx.x(pair[1]).floor();
            if x1 <= x0 {
                continue;
            }
            frame.push_rect(
                GanttLayerKind::Axis,
                RectPrimitive::new(
                    x0,
                    axis_top + WEEKEND_LABEL_TOP_PX,
                    x1 - x0,
                    WEEKEND_LABEL_HEIGHT_PX,
                    theme.weekend_label_fill,
                ),
            );
        }
    }

    let line_y = axis_top + DOMAIN_LINE_OFFSET_PX;
    for tick in &ticks {
        let x = ctx.x(*tick);
        frame.push_line(
            GanttLayerKind::Axis,
            LinePrimitive::new(
                x,
                axis_top + BOTTOM_TICK_TOP_PX,
                x,
                line_y,
                1.5,
                theme.axis_line_color,
            ),
        );
    }
    frame.push_line(
        GanttLayerKind::Axis,
        LinePrimitive::new(
            ctx.chart_left(),
            line_y,
            ctx.chart_right(),
            line_y,
            2.0,
            theme.axis_line_color,
        ),
    );

    let font = theme.axis_font;
    for label in labels {
        if label.text.is_empty() {
            continue;
        }
        frame.push_text(
            GanttLayerKind::Axis,
            TextPrimitive::new(
                label.text,
                label.x,
                axis_top + BOTTOM_LABEL_OFFSET_PX,
                font.size_px,
                font.color,
                TextHAlign::Center,
            )
            .with_emphasis(font.bold, font.italic),
        );
    }
}
