use crate::core::{RowKey, SelectionHandle, Task, VisualRow};
use crate::render::Color;

use super::bar_layer_builder::bar_gradient_id;
use super::redraw_context::RedrawContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Task { task: usize },
    Group,
}

/// One placed bar in frame pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    /// Task id, or the parent name for group bars.
    pub id: String,
    pub key: RowKey,
    pub row_index: usize,
    pub kind: BarKind,
    pub start_ms: f64,
    pub end_ms: f64,
    pub secondary_range: Option<(f64, f64)>,
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
    pub completion: Option<f64>,
    pub color: Color,
    pub gradient_id: String,
    /// Source row handle; `None` for group bars.
    pub selection: Option<SelectionHandle>,
    /// False when another task is selected.
    pub emphasized: bool,
}

impl BarDatum {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Projects every placeable row through the effective scale.
///
/// Rows without a finite start and end are skipped; the rest keep their
/// row order. Widths are clamped at zero.
pub(super) fn project_bars(ctx: &RedrawContext<'_>) -> Vec<BarDatum> {
    let selected = selected_task(ctx.input.tasks, ctx.view.selection);
    let mut bars = Vec::with_capacity(ctx.input.rows.len());
    for (index, row) in ctx.input.rows.rows.iter().enumerate() {
        let range = match row {
            VisualRow::Group { key, .. } => ctx
                .input
                .rows
                .group_range(key.parent())
                .and_then(|range| range.placed_range()),
            VisualRow::Task { task, .. } => ctx.input.tasks[*task].placed_range(),
        };
        let Some((start, end)) = range else {
            continue;
        };
        let Some(span) = project_span(ctx, start, end) else {
            continue;
        };
        let placement = (ctx.bar_top(index), ctx.bar_height);
        bars.push(bar_datum(ctx, selected, index, row, (start, end), span, placement));
    }
    bars
}

/// Secondary ranges as thin bars under the main bar of each row.
pub(super) fn project_secondary_bars(ctx: &RedrawContext<'_>) -> Vec<BarDatum> {
    let selected = selected_task(ctx.input.tasks, ctx.view.selection);
    let height = ctx.theme().secondary_bar_height;
    let row_height = ctx.bands.bandwidth();
    let mut bars = Vec::new();
    for (index, row) in ctx.input.rows.rows.iter().enumerate() {
        let range = match row {
            VisualRow::Group { key, .. } => ctx
                .input
                .rows
                .group_range(key.parent())
                .and_then(|range| range.placed_secondary_range()),
            VisualRow::Task { task, .. } => ctx.input.tasks[*task].placed_secondary_range(),
        };
        let Some((start, end)) = range else {
            continue;
        };
        let Some(span) = project_span(ctx, start, end) else {
            continue;
        };
        let below_bar = ctx.bar_top(index) + ctx.bar_height + 2.0;
        let row_floor = ctx.row_top(index) + row_height - height;
        let placement = (below_bar.min(row_floor), height);
        bars.push(bar_datum(ctx, selected, index, row, (start, end), span, placement));
    }
    bars
}

fn project_span(ctx: &RedrawContext<'_>, start: f64, end: f64) -> Option<(f64, f64)> {
    let x1 = ctx.x(start);
    let x2 = ctx.x(end);
    if !x1.is_finite() || !x2.is_finite() {
        return None;
    }
    Some((x1, (x2 - x1).max(0.0)))
}

fn bar_datum(
    ctx: &RedrawContext<'_>,
    selected: Option<&Task>,
    row_index: usize,
    row: &VisualRow,
    (start_ms, end_ms): (f64, f64),
    (x, width): (f64, f64),
    (y, height): (f64, f64),
) -> BarDatum {
    let (id, kind, completion, secondary_range, color, selection, emphasized) = match row {
        VisualRow::Group { key, .. } => {
            let parent = key.parent();
            let range = ctx.input.rows.group_range(parent);
            let emphasized = selected.is_none_or(|task| task.parent == parent);
            (
                parent.to_owned(),
                BarKind::Group,
                range.map(|range| range.completion),
                range.and_then(|range| range.placed_secondary_range()),
                ctx.input.colors.for_parent(parent),
                None,
                emphasized,
            )
        }
        VisualRow::Task { task, .. } => {
            let source = &ctx.input.tasks[*task];
            let emphasized = selected.is_none_or(|chosen| chosen.selection == source.selection);
            (
                source.id.clone(),
                BarKind::Task { task: *task },
                source.completion,
                source.placed_secondary_range(),
                ctx.input.colors.for_task(source),
                Some(source.selection),
                emphasized,
            )
        }
    };
    BarDatum {
        id,
        key: row.key().clone(),
        row_index,
        kind,
        start_ms,
        end_ms,
        secondary_range,
        x,
        width,
        y,
        height,
        completion,
        color,
        gradient_id: bar_gradient_id(row_index),
        selection,
        emphasized,
    }
}

fn selected_task(tasks: &[Task], selection: Option<SelectionHandle>) -> Option<&Task> {
    let handle = selection?;
    tasks.iter().find(|task| task.selection == handle)
}

#[cfg(test)]
mod tests {
    use super::{BarKind, project_bars};
    use crate::api::layout::{ChartLayout, LayoutNeeds};
    use crate::api::redraw_context::{RedrawContext, RedrawInput};
    use crate::api::{ColorAssignments, ColorResolver, ColumnHeaders, GanttTheme, ViewState};
    use crate::core::{
        ExpansionState, GranularityThresholds, MILLIS_PER_DAY, RowKey, SelectionHandle, Task,
        TimeScale, Viewport, build_rows,
    };

    fn task(id: &str, source_row: usize, start_day: f64, end_day: f64) -> Task {
        let mut task = Task::new(id, "Phase A", source_row);
        task.start = Some(start_day * MILLIS_PER_DAY);
        task.end = Some(end_day * MILLIS_PER_DAY);
        task
    }

    #[test]
    fn bars_carry_row_identity_and_selection_handles() {
        let mut design = task("Design", 4, 0.0, 3.0);
        design.secondary_start = Some(MILLIS_PER_DAY);
        design.secondary_end = Some(2.0 * MILLIS_PER_DAY);
        let tasks = vec![design, task("Build", 7, 2.0, 8.0)];
        let (rows, _) = build_rows(&tasks, &ExpansionState::default());
        let theme = GanttTheme::default();
        let layout = ChartLayout::resolve(
            Viewport::new(1_400, 600),
            &theme,
            &ColumnHeaders::default(),
            LayoutNeeds {
                task_columns: 1,
                ..LayoutNeeds::default()
            },
        )
        .expect("layout");
        let colors = ColorResolver::new(&tasks, ColorAssignments::default(), theme.palette.clone());
        let original = TimeScale::new((0.0, 10.0 * MILLIS_PER_DAY), (0.0, layout.chart_width))
            .expect("scale");
        let input = RedrawInput {
            tasks: &tasks,
            rows: &rows,
            layout: &layout,
            theme: &theme,
            colors: &colors,
            original,
            thresholds: GranularityThresholds::default(),
            today_ms: f64::NAN,
        };
        let view = ViewState::default();
        let ctx = RedrawContext::new(input, &view).expect("context");

        let bars = project_bars(&ctx);
        assert_eq!(bars.len(), 3);

        let group = &bars[0];
        assert_eq!(group.kind, BarKind::Group);
        assert_eq!(group.id, "Phase A");
        assert_eq!(group.key, RowKey::group("Phase A"));
        assert_eq!(group.selection, None);
        assert_eq!(
            group.secondary_range,
            Some((MILLIS_PER_DAY, 2.0 * MILLIS_PER_DAY))
        );

        let design = &bars[1];
        assert_eq!(design.id, "Design");
        assert_eq!(design.key, RowKey::task("Design", "Phase A"));
        assert_eq!(design.row_index, 1);
        assert_eq!(design.gradient_id, "bar-completion-1");
        assert_eq!(design.selection, Some(SelectionHandle::new(4)));

        let build = &bars[2];
        assert_eq!(build.gradient_id, "bar-completion-2");
        assert_eq!(build.selection, Some(SelectionHandle::new(7)));
        assert_eq!(build.secondary_range, None);
    }
}
