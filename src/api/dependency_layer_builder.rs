use indexmap::IndexMap;
use smallvec::smallvec;

use crate::core::{RowKey, Task};
use crate::render::{GanttLayerKind, LayeredRenderFrame, PathCommand, PathCommands, PathPrimitive};

use super::redraw_context::RedrawContext;

/// Pixel anchor of one end of a dependency connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorEnd {
    pub x: f64,
    pub y: f64,
}

/// Orthogonal route from a predecessor's end to a successor's start.
///
/// When the successor starts right of the predecessor's exit the route is
/// a single elbow; otherwise it doubles back through the gap between the
/// two rows.
#[must_use]
pub fn elbow_path(from: ConnectorEnd, to: ConnectorEnd, gap_px: f64, row_height: f64) -> PathCommands {
    let exit_x = from.x + gap_px;
    let mut commands: PathCommands = smallvec![
        PathCommand::MoveTo {
            x: from.x,
            y: from.y
        },
        PathCommand::HorizontalTo { x: exit_x },
    ];
    if to.x - gap_px >= exit_x {
        commands.push(PathCommand::VerticalTo { y: to.y });
    } else {
        let direction = if to.y >= from.y { 1.0 } else { -1.0 };
        commands.push(PathCommand::VerticalTo {
            y: from.y + direction * row_height / 2.0,
        });
        commands.push(PathCommand::HorizontalTo { x: to.x - gap_px });
        commands.push(PathCommand::VerticalTo { y: to.y });
    }
    commands.push(PathCommand::HorizontalTo { x: to.x });
    commands
}

/// Right-pointing arrowhead with its tip on `tip`.
#[must_use]
pub fn arrow_head(tip: ConnectorEnd, size_px: f64) -> PathCommands {
    smallvec![
        PathCommand::MoveTo { x: tip.x, y: tip.y },
        PathCommand::LineTo {
            x: tip.x - size_px,
            y: tip.y - size_px / 2.0,
        },
        PathCommand::LineTo {
            x: tip.x - size_px,
            y: tip.y + size_px / 2.0,
        },
        PathCommand::Close,
    ]
}

pub(super) fn build_dependency_layer(ctx: &RedrawContext<'_>, frame: &mut LayeredRenderFrame) {
    let theme = ctx.theme();
    if !theme.show_dependencies {
        return;
    }
    let tasks = ctx.input.tasks;
    let mut by_id: IndexMap<&str, &Task> = IndexMap::new();
    for task in tasks {
        by_id.entry(task.id.as_str()).or_insert(task);
    }

    let color = theme.dependency_color;
    for successor in tasks {
        let Some(predecessor) = successor
            .predecessor
            .as_deref()
            .and_then(|id| by_id.get(id).copied())
        else {
            continue;
        };
        let Some((from_row, from_time)) = endpoint(ctx, predecessor, Edge::End) else {
            continue;
        };
        let Some((to_row, to_time)) = endpoint(ctx, successor, Edge::Start) else {
            continue;
        };
        if from_row == to_row {
            continue;
        }

        let from = ConnectorEnd {
            x: ctx.x(from_time),
            y: ctx.row_center(from_row),
        };
        let to = ConnectorEnd {
            x: ctx.x(to_time),
            y: ctx.row_center(to_row),
        };
        if !(from.x.is_finite() && to.x.is_finite()) {
            continue;
        }

        let route = elbow_path(from, to, theme.dependency_gap_px, ctx.bands.bandwidth());
        frame.push_path(
            GanttLayerKind::Dependencies,
            PathPrimitive::stroked(route, color, theme.dependency_stroke_width),
        );
        frame.push_path(
            GanttLayerKind::Dependencies,
            PathPrimitive::filled(arrow_head(to, theme.dependency_arrow_px), color),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

/// Row and instant a connector attaches to. Tasks hidden in a collapsed
/// group attach to the group row at the group's extent.
fn endpoint(ctx: &RedrawContext<'_>, task: &Task, edge: Edge) -> Option<(usize, f64)> {
    let task_key = RowKey::task(task.id.clone(), task.parent.clone());
    if let Some(row) = ctx.bands.index_of(&task_key) {
        let (start, end) = task.placed_range()?;
        return Some((row, pick(edge, start, end)));
    }
    let row = ctx.bands.index_of(&RowKey::group(task.parent.clone()))?;
    let (start, end) = ctx.input.rows.group_range(&task.parent)?.placed_range()?;
    Some((row, pick(edge, start, end)))
}

fn pick(edge: Edge, start: f64, end: f64) -> f64 {
    match edge {
        Edge::Start => start,
        Edge::End => end,
    }
}
