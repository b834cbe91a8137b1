use smallvec::smallvec;

use crate::core::completion::{completion_label, overlay_width};
use crate::render::{
    GanttLayerKind, GradientPrimitive, LayeredRenderFrame, PathCommand, PathCommands,
    PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::axis_label_format::format_duration_label;
use super::bar_projection::{BarDatum, BarKind, project_bars, project_secondary_bars};
use super::redraw_context::RedrawContext;

const GROUP_TAB_TOP_RATIO: f64 = 0.5;
const GROUP_TAB_TIP_RATIO: f64 = 0.6;
const GROUP_TAB_INSET_RATIO: f64 = 0.15;
const GROUP_TAB_INSET_MAX_PX: f64 = 35.0;

const COMPLETION_LABEL_BACKOFF_PX: f64 = 6.0;
const DURATION_LABEL_GAP_PX: f64 = 4.0;
const BAR_LABEL_BASELINE_PX: f64 = 4.0;

/// Pointed-tab silhouette of a group bar spanning `x1..x2`.
///
/// The corner inset grows with the bar width up to a fixed cap.
#[must_use]
pub fn group_bar_path(x1: f64, x2: f64, y_top: f64, bar_height: f64) -> PathCommands {
    let x2 = x2.max(x1);
    let top_height = bar_height * GROUP_TAB_TOP_RATIO;
    let tip_height = bar_height * GROUP_TAB_TIP_RATIO;
    let inset = ((x2 - x1) * GROUP_TAB_INSET_RATIO).min(GROUP_TAB_INSET_MAX_PX);
    let inner_y = y_top + top_height;
    let tip_y = inner_y + tip_height;
    smallvec![
        PathCommand::MoveTo { x: x1, y: y_top },
        PathCommand::HorizontalTo { x: x2 },
        PathCommand::LineTo { x: x2, y: tip_y },
        PathCommand::LineTo {
            x: x2 - inset,
            y: inner_y,
        },
        PathCommand::HorizontalTo { x: x1 + inset },
        PathCommand::LineTo { x: x1, y: tip_y },
        PathCommand::Close,
    ]
}

/// Gradient id of the split fill for the bar on row `row_index`.
#[must_use]
pub fn bar_gradient_id(row_index: usize) -> String {
    format!("bar-completion-{row_index}")
}

pub(super) fn build_bar_layers(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let theme = ctx.theme();
    if theme.show_secondary_bars {
        for bar in project_secondary_bars(ctx) {
            let color = theme
                .secondary_bar_color
                .with_alpha(bar_alpha(ctx, &bar) * theme.secondary_bar_color.alpha);
            frame.push_rect(
                GanttLayerKind::SecondaryBars,
                RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, color),
            );
        }
    }

    for bar in project_bars(ctx) {
        match bar.kind {
            BarKind::Group => push_group_bar(ctx, frame, &bar),
            BarKind::Task { .. } => push_task_bar(ctx, frame, &bar),
        }
        push_duration_label(ctx, frame, &bar);
    }
}

fn push_group_bar(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame, bar: &BarDatum) {
    let color = bar.color.with_alpha(bar_alpha(ctx, bar));
    let commands = group_bar_path(bar.x, bar.right(), bar.y, bar.height);
    frame.push_path(
        GanttLayerKind::Bars,
        PathPrimitive::filled(commands, color).with_stroke(color, 1.0),
    );
}

fn push_task_bar(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame, bar: &BarDatum) {
    let theme = ctx.theme();
    let alpha = bar_alpha(ctx, bar);
    let fill = bar.color.lighten(theme.task_fill_lighten).with_alpha(alpha);
    let stroke = bar.color.with_alpha(alpha);

    let mut rect = RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, fill)
        .with_border(theme.bar_stroke_width, stroke)
        .with_corner_radius(theme.bar_corner_radius);

    let completion = bar.completion.unwrap_or(0.0);
    if completion > 0.0 {
        let id = bar.gradient_id.clone();
        frame.push_gradient(GradientPrimitive {
            id: id.clone(),
            split_ratio: completion,
            start_color: stroke,
            end_color: fill,
        });
        rect = rect.with_gradient(id);
    }
    frame.push_rect(GanttLayerKind::Bars, rect);

    if completion <= 0.0 {
        return;
    }
    frame.push_rect(
        GanttLayerKind::Completion,
        RectPrimitive::new(
            bar.x,
            bar.y,
            overlay_width(bar.width, completion),
            bar.height,
            stroke,
        )
        .with_corner_radius(theme.bar_corner_radius),
    );

    if theme.show_completion_labels {
        let font = theme.completion_label_font;
        frame.push_text(
            GanttLayerKind::BarLabels,
            TextPrimitive::new(
                completion_label(completion),
                bar.x + bar.width * completion - COMPLETION_LABEL_BACKOFF_PX,
                label_y(bar),
                font.size_px,
                font.color,
                TextHAlign::Left,
            )
            .with_emphasis(font.bold, font.italic),
        );
    }
}

fn push_duration_label(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame, bar: &BarDatum) {
    let theme = ctx.theme();
    if !theme.show_duration_labels {
        return;
    }
    let name = match bar.kind {
        BarKind::Task { task } => ctx.input.tasks[task].id.as_str(),
        BarKind::Group => match ctx.input.rows.rows.get(bar.row_index) {
            Some(row) => row.parent(),
            None => return,
        },
    };
    if name.is_empty() {
        return;
    }
    let font = theme.bar_label_font;
    frame.push_text(
        GanttLayerKind::BarLabels,
        TextPrimitive::new(
            format_duration_label(name, bar.end_ms - bar.start_ms),
            bar.right() + DURATION_LABEL_GAP_PX,
            label_y(bar),
            font.size_px,
            font.color,
            TextHAlign::Left,
        )
        .with_emphasis(font.bold, font.italic),
    );
}

fn label_y(bar: &BarDatum) -> f64 {
    bar.y + bar.height / 2.0 + BAR_LABEL_BASELINE_PX
}

fn bar_alpha(ctx: &RedrawContext<'_>, bar: &BarDatum) -> f64 {
    let theme = ctx.theme();
    if bar.emphasized {
        theme.bar_opacity
    } else {
        theme.unselected_bar_opacity
    }
}
