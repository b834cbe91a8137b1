use chrono::Weekday;

use crate::core::calendar::{self, CalendarUnit};
use crate::core::{Granularity, VisualRow};
use crate::render::{
    GanttLayerKind, LayeredRenderFrame, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::axis_label_format::MAX_AXIS_BOUNDARIES;
use super::redraw_context::RedrawContext;

pub const TODAY_LABEL: &str = "Today";
const TODAY_LABEL_OFFSET_PX: f64 = 12.0;

pub(super) fn build_background_layers(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let theme = ctx.theme();
    let layout = ctx.input.layout;
    frame.push_rect(
        GanttLayerKind::Background,
        RectPrimitive::new(
            0.0,
            0.0,
            f64::from(layout.viewport.width),
            f64::from(layout.viewport.height),
            theme.background_color,
        ),
    );

    let full_width = f64::from(layout.viewport.width);
    for (index, row) in ctx.input.rows.rows.iter().enumerate() {
        if let VisualRow::Group { .. } = row {
            frame.push_rect(
                GanttLayerKind::Background,
                RectPrimitive::new(
                    0.0,
                    ctx.row_top(index),
                    full_width,
                    ctx.bands.bandwidth(),
                    theme.parent_row_background,
                ),
            );
        }
    }

    match ctx.granularity {
        Granularity::Day => push_weekends(ctx, frame),
        Granularity::Month => push_calendar_lines(ctx, frame, CalendarUnit::Month),
        Granularity::Hour => push_calendar_lines(ctx, frame, CalendarUnit::Day),
        Granularity::Year => {}
    }

    if theme.show_row_grid {
        for index in 0..ctx.bands.len() {
            let y = ctx.row_top(index);
            frame.push_line(
                GanttLayerKind::Grid,
                LinePrimitive::new(0.0, y, ctx.chart_right(), y, 1.0, theme.row_grid_color),
            );
        }
    }

    if theme.show_today_marker {
        push_today_marker(ctx, frame);
    }
}

/// Saturday-to-Monday bands over the timeline body.
fn push_weekends(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let visible = ctx.visible;
    let first = calendar::offset(
        CalendarUnit::Day,
        calendar::floor(CalendarUnit::Day, visible.start),
        -1,
    );
    let days = calendar::boundaries(CalendarUnit::Day, 1, first, visible.end, MAX_AXIS_BOUNDARIES);
    for saturday in days
        .into_iter()
        .filter(|day| calendar::weekday(*day) == Some(Weekday::Sat))
    {
        let monday = calendar::offset(CalendarUnit::Day, saturday, 2);
        let x0 = ctx.x(saturday).max(ctx.chart_left());
        let x1 = ctx.x(monday).min(ctx.chart_right());
        if x1 <= x0 {
            continue;
        }
        frame.push_rect(
            GanttLayerKind::Background,
            RectPrimitive::new(
                x0,
                ctx.input.layout.body_top(),
                x1 - x0,
                ctx.input.layout.body_height,
                ctx.theme().weekend_fill,
            ),
        );
    }
}

fn push_calendar_lines(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame, unit: CalendarUnit) {
    let top = ctx.input.layout.body_top();
    let bottom = ctx.body_bottom();
    let color = ctx.theme().calendar_line_color;
    for boundary in
        calendar::boundaries(unit, 1, ctx.visible.start, ctx.visible.end, MAX_AXIS_BOUNDARIES)
    {
        let x = ctx.x(boundary);
        frame.push_line(
            GanttLayerKind::Background,
            LinePrimitive::new(x, top, x, bottom, 1.0, color),
        );
    }
}

fn push_today_marker(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let today = ctx.input.today_ms;
    if !today.is_finite() || !ctx.visible.contains(today) {
        return;
    }
    let theme = ctx.theme();
    let x = ctx.x(today);
    let top = ctx.input.layout.body_top();
    frame.push_line(
        GanttLayerKind::Markers,
        LinePrimitive::new(x, top, x, ctx.body_bottom(), 1.5, theme.today_line_color)
            .with_stroke_style(theme.today_line_style),
    );
    let font = theme.today_font;
    frame.push_text(
        GanttLayerKind::Markers,
        TextPrimitive::new(
            TODAY_LABEL,
            x,
            top + TODAY_LABEL_OFFSET_PX,
            font.size_px,
            font.color,
            TextHAlign::Center,
        )
        .with_emphasis(font.bold, font.italic),
    );
}
