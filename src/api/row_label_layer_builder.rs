use crate::core::{GroupRange, Task, VisualRow};
use crate::render::{
    GanttLayerKind, LayeredRenderFrame, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::axis_label_format::{format_duration_value, format_panel_date};
use super::layout::{ColumnKind, ColumnLayout};
use super::redraw_context::RedrawContext;
use super::theme::FontStyle;

pub const EXPANDED_GLYPH: &str = "\u{25BC}";
pub const COLLAPSED_GLYPH: &str = "\u{25B6}";

const TASK_INDENT_PX: f64 = 16.0;
const TEXT_BASELINE_PX: f64 = 4.0;
const HEADER_TEXT_INSET_PX: f64 = 10.0;

/// Text shown in `column` for one visual row.
#[must_use]
pub fn row_cell_text(
    row: &VisualRow,
    tasks: &[Task],
    group_range: GroupRange,
    kind: ColumnKind,
) -> String {
    match row {
        VisualRow::Group {
            key,
            expanded,
            duration,
            ..
        } => match kind {
            ColumnKind::Task(0) => {
                let glyph = if *expanded {
                    EXPANDED_GLYPH
                } else {
                    COLLAPSED_GLYPH
                };
                format!("{glyph} {}", key.parent())
            }
            ColumnKind::Start => format_panel_date(group_range.start),
            ColumnKind::End => format_panel_date(group_range.end),
            ColumnKind::SecondaryStart => format_panel_date(group_range.secondary_start),
            ColumnKind::SecondaryEnd => format_panel_date(group_range.secondary_end),
            ColumnKind::Duration => format_duration_value(*duration),
            _ => String::new(),
        },
        VisualRow::Task { task, .. } => {
            let task = &tasks[*task];
            match kind {
                ColumnKind::Task(index) => task
                    .fields
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| if index == 0 { task.id.clone() } else { String::new() }),
                ColumnKind::Start => format_panel_date(task.start),
                ColumnKind::End => format_panel_date(task.end),
                ColumnKind::SecondaryStart => format_panel_date(task.secondary_start),
                ColumnKind::SecondaryEnd => format_panel_date(task.secondary_end),
                ColumnKind::Duration => task.duration.map(format_duration_value).unwrap_or_default(),
                ColumnKind::Extra(index) => task.extra.get(index).cloned().unwrap_or_default(),
            }
        }
    }
}

pub(super) fn build_row_label_layer(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let layout = ctx.input.layout;
    if layout.columns.is_empty() {
        return;
    }
    let theme = ctx.theme();
    let panel_width = layout.panel_width;
    let row_height = ctx.bands.bandwidth();

    frame.push_rect(
        GanttLayerKind::RowLabels,
        RectPrimitive::new(
            0.0,
            0.0,
            panel_width,
            f64::from(layout.viewport.height),
            theme.background_color,
        ),
    );

    for (index, row) in ctx.input.rows.rows.iter().enumerate() {
        let top = ctx.row_top(index);
        let font = if row.is_group() {
            frame.push_rect(
                GanttLayerKind::RowLabels,
                RectPrimitive::new(0.0, top, panel_width, row_height, theme.parent_row_background),
            );
            theme.parent_font
        } else {
            theme.task_font
        };

        let group_range = ctx.input.rows.group_range(row.parent()).unwrap_or_default();
        let y = ctx.row_center(index) + TEXT_BASELINE_PX;
        for column in &layout.columns {
            let text = row_cell_text(row, ctx.input.tasks, group_range, column.kind);
            if text.is_empty() {
                continue;
            }
            let x = cell_x(column, row);
            push_text(frame, text, x, y, font);
        }

        if theme.show_row_grid {
            frame.push_line(
                GanttLayerKind::RowLabels,
                LinePrimitive::new(0.0, top, panel_width, top, 1.0, theme.row_grid_color),
            );
        }
    }

    frame.push_rect(
        GanttLayerKind::RowLabels,
        RectPrimitive::new(0.0, 0.0, panel_width, layout.header_height, theme.header_background),
    );
    let header_y = layout.header_height - HEADER_TEXT_INSET_PX;
    for column in &layout.columns {
        if column.title.is_empty() {
            continue;
        }
        push_text(frame, column.title.clone(), column.x, header_y, theme.header_font);
    }
    frame.push_line(
        GanttLayerKind::RowLabels,
        LinePrimitive::new(
            0.0,
            layout.header_height,
            panel_width,
            layout.header_height,
            1.0,
            theme.axis_line_color,
        ),
    );
}

fn cell_x(column: &ColumnLayout, row: &VisualRow) -> f64 {
    match (column.kind, row) {
        (ColumnKind::Task(0), VisualRow::Task { .. }) => column.x + TASK_INDENT_PX,
        _ => column.x,
    }
}

fn push_text(frame: &mut LayeredRenderFrame, text: String, x: f64, y: f64, font: FontStyle) {
    frame.push_text(
        GanttLayerKind::RowLabels,
        TextPrimitive::new(text, x, y, font.size_px, font.color, TextHAlign::Left)
            .with_emphasis(font.bold, font.italic),
    );
}
